//! End-to-end tests for the run pipeline with in-process doubles.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, TimeZone};
use moonx::{
    AuditStore, InMemoryPostLogRepository, MoonPhaseReading, MoonPipeline, MoonxResult,
    NewPostRecord, PhaseSource, PostLogRepository, PostRecord, PostRequest, PostResponse,
    PostingService, RunOutcome, RunStage,
};
use moonx_database::DatabaseResult;
use moonx_error::{DatabaseError, DatabaseErrorKind, MoonxErrorKind, SocialError, SocialErrorKind};
use serde_json::{Value, json};
use std::cell::Cell;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

struct StubSource {
    payload: Value,
}

#[async_trait]
impl PhaseSource for StubSource {
    async fn fetch_reading(&self) -> MoonxResult<MoonPhaseReading> {
        Ok(MoonPhaseReading::from_payload(self.payload.clone()))
    }
}

fn source(phase: &str) -> StubSource {
    StubSource {
        payload: json!({"moon_phase": phase, "moonrise": "18:02", "moon_illumination_percentage": "99.1"}),
    }
}

#[derive(Default)]
struct RecordingPoster {
    requests: Mutex<Vec<PostRequest>>,
    fail_with: Option<SocialErrorKind>,
}

impl RecordingPoster {
    fn failing(kind: SocialErrorKind) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail_with: Some(kind),
        }
    }

    fn requests(&self) -> Vec<PostRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PostingService for RecordingPoster {
    async fn create_post(&self, request: &PostRequest) -> MoonxResult<PostResponse> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.fail_with {
            Some(kind) => Err(SocialError::new(kind.clone()).into()),
            None => Ok(PostResponse::new(
                "101",
                json!({"id": "101", "text": request.text()}),
            )),
        }
    }
}

/// Lets the test inspect the log after the pipeline has taken ownership.
#[derive(Clone, Default)]
struct SharedLog(Arc<Mutex<InMemoryPostLogRepository>>);

impl SharedLog {
    fn with(repo: InMemoryPostLogRepository) -> Self {
        Self(Arc::new(Mutex::new(repo)))
    }

    fn rows(&self) -> Vec<PostRecord> {
        self.0.lock().unwrap().rows().to_vec()
    }
}

impl PostLogRepository for SharedLog {
    fn last_post_id(&mut self) -> DatabaseResult<Option<String>> {
        self.0.lock().unwrap().last_post_id()
    }

    fn record_post(&mut self, new_record: NewPostRecord) -> DatabaseResult<PostRecord> {
        self.0.lock().unwrap().record_post(new_record)
    }

    fn recent_posts(&mut self, limit: i64) -> DatabaseResult<Vec<PostRecord>> {
        self.0.lock().unwrap().recent_posts(limit)
    }
}

fn prior(id: i32, tweet_id: &str, timestamp: i64) -> PostRecord {
    PostRecord {
        id,
        tweet_id: tweet_id.to_string(),
        text: format!("malam ini bulan baru 🌑 ({})", timestamp),
        timestamp,
        replied: false,
        replied_with_id: None,
    }
}

fn evening() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(7 * 3600)
        .unwrap()
        .with_ymd_and_hms(2025, 3, 14, 19, 0, 0)
        .unwrap()
}

#[tokio::test]
async fn test_full_moon_replies_to_last_logged_post() {
    let dir = TempDir::new().unwrap();
    let store = AuditStore::new(dir.path()).unwrap();
    let source = source("full_moon");
    let poster = RecordingPoster::default();
    let log = SharedLog::with(InMemoryPostLogRepository::with_rows(vec![prior(1, "100", 1_700_000_000)]));

    let pipeline = MoonPipeline::new(&source, &poster, &store);
    let handle = log.clone();
    let outcome = pipeline
        .run(move || Ok(handle), evening(), false)
        .await
        .unwrap();

    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(outcome.stage(), RunStage::Done);

    let requests = poster.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].in_reply_to().as_deref(), Some("100"));
    assert!(requests[0].text().contains("bulan purnama 🌕"));
    assert_eq!(
        requests[0].text(),
        &format!("malam ini bulan purnama 🌕 ({})", evening().timestamp())
    );

    let rows = log.rows();
    assert_eq!(rows.len(), 2);
    let new_row = &rows[1];
    assert_eq!(new_row.id, 2);
    assert_eq!(new_row.tweet_id, "101");
    assert!(new_row.replied);
    assert_eq!(new_row.replied_with_id.as_deref(), Some("100"));
    assert_eq!(new_row.timestamp, evening().timestamp());

    match outcome {
        RunOutcome::Posted { record } => assert_eq!(&record, new_row),
        other => panic!("expected Posted, got {other:?}"),
    }

    let raw = store.read("moon_raw.json").await.unwrap();
    assert_eq!(raw["moon_phase"], "full_moon");
    let metadata = store.read("tweet_metadata_20250314_190000.json").await.unwrap();
    assert_eq!(metadata["id"], "101");
}

#[tokio::test]
async fn test_reply_target_is_highest_id_not_latest_timestamp() {
    let dir = TempDir::new().unwrap();
    let store = AuditStore::new(dir.path()).unwrap();
    let source = source("WANING_CRESCENT");
    let poster = RecordingPoster::default();
    let log = SharedLog::with(InMemoryPostLogRepository::with_rows(vec![
        prior(1, "older-id-newer-clock", 1_900_000_000),
        prior(2, "newer-id-older-clock", 1_600_000_000),
    ]));

    let pipeline = MoonPipeline::new(&source, &poster, &store);
    let handle = log.clone();
    pipeline
        .run(move || Ok(handle), evening(), false)
        .await
        .unwrap();

    assert_eq!(
        poster.requests()[0].in_reply_to().as_deref(),
        Some("newer-id-older-clock")
    );
    assert_eq!(
        log.rows()[2].replied_with_id.as_deref(),
        Some("newer-id-older-clock")
    );
}

#[tokio::test]
async fn test_empty_log_posts_top_level() {
    let dir = TempDir::new().unwrap();
    let store = AuditStore::new(dir.path()).unwrap();
    let source = source("new_moon");
    let poster = RecordingPoster::default();
    let log = SharedLog::default();

    let pipeline = MoonPipeline::new(&source, &poster, &store);
    let handle = log.clone();
    let outcome = pipeline
        .run(move || Ok(handle), evening(), false)
        .await
        .unwrap();

    assert_eq!(outcome.exit_code(), 0);
    assert!(!poster.requests()[0].is_reply());

    let rows = log.rows();
    assert_eq!(rows.len(), 1);
    assert!(!rows[0].replied);
    assert_eq!(rows[0].replied_with_id, None);
}

#[tokio::test]
async fn test_post_failure_writes_no_row() {
    let dir = TempDir::new().unwrap();
    let store = AuditStore::new(dir.path()).unwrap();
    let source = source("first_quarter");
    let poster = RecordingPoster::failing(SocialErrorKind::RateLimited("Too Many Requests".into()));
    let log = SharedLog::with(InMemoryPostLogRepository::with_rows(vec![prior(1, "100", 1)]));

    let pipeline = MoonPipeline::new(&source, &poster, &store);
    let handle = log.clone();
    let outcome = pipeline
        .run(move || Ok(handle), evening(), false)
        .await
        .unwrap();

    assert_eq!(outcome.exit_code(), 2);
    assert_eq!(outcome.stage(), RunStage::Failed);
    match &outcome {
        RunOutcome::PostFailed {
            reply_to, error, ..
        } => {
            assert_eq!(reply_to.as_deref(), Some("100"));
            assert!(matches!(
                error.kind(),
                MoonxErrorKind::Social(e) if matches!(e.kind, SocialErrorKind::RateLimited(_))
            ));
        }
        other => panic!("expected PostFailed, got {other:?}"),
    }

    assert_eq!(log.rows().len(), 1);
    assert!(
        store
            .read("tweet_metadata_20250314_190000.json")
            .await
            .is_err()
    );
}

#[tokio::test]
async fn test_log_failure_after_post_reports_live_post() {
    let dir = TempDir::new().unwrap();
    let store = AuditStore::new(dir.path()).unwrap();
    let source = source("waxing_gibbous");
    let poster = RecordingPoster::default();
    let log = SharedLog::with(
        InMemoryPostLogRepository::with_rows(vec![prior(4, "400", 1)]).fail_writes(true),
    );

    let pipeline = MoonPipeline::new(&source, &poster, &store);
    let handle = log.clone();
    let outcome = pipeline
        .run(move || Ok(handle), evening(), false)
        .await
        .unwrap();

    assert_eq!(outcome.exit_code(), 3);
    match &outcome {
        RunOutcome::LogFailed {
            post_id,
            text,
            reply_to,
            error,
        } => {
            assert_eq!(post_id, "101");
            assert!(text.contains("bulan cembung awal 🌔"));
            assert_eq!(reply_to.as_deref(), Some("400"));
            assert!(matches!(error.kind(), MoonxErrorKind::Database(_)));
        }
        other => panic!("expected LogFailed, got {other:?}"),
    }

    assert_eq!(poster.requests().len(), 1);
    assert_eq!(log.rows().len(), 1);
}

#[tokio::test]
async fn test_unknown_phase_aborts_before_database_and_post() {
    let dir = TempDir::new().unwrap();
    let store = AuditStore::new(dir.path()).unwrap();
    let source = source("blue_moon");
    let poster = RecordingPoster::default();
    let connected = Cell::new(false);

    let pipeline = MoonPipeline::new(&source, &poster, &store);
    let err = pipeline
        .run(
            || {
                connected.set(true);
                Ok(InMemoryPostLogRepository::new())
            },
            evening(),
            false,
        )
        .await
        .unwrap_err();

    assert!(format!("{err}").contains("BLUE_MOON"));
    assert!(!connected.get());
    assert!(poster.requests().is_empty());

    let raw = store.read("moon_raw.json").await.unwrap();
    assert_eq!(raw["moon_phase"], "blue_moon");
}

#[tokio::test]
async fn test_missing_phase_field_is_unknown() {
    let dir = TempDir::new().unwrap();
    let store = AuditStore::new(dir.path()).unwrap();
    let source = StubSource {
        payload: json!({"moonrise": "18:02"}),
    };
    let poster = RecordingPoster::default();

    let pipeline = MoonPipeline::new(&source, &poster, &store);
    let result = pipeline
        .run(|| Ok(InMemoryPostLogRepository::new()), evening(), false)
        .await;

    assert!(result.is_err());
    assert!(poster.requests().is_empty());
}

#[tokio::test]
async fn test_database_unreachable_aborts_before_post() {
    let dir = TempDir::new().unwrap();
    let store = AuditStore::new(dir.path()).unwrap();
    let source = source("full_moon");
    let poster = RecordingPoster::default();

    let pipeline = MoonPipeline::new(&source, &poster, &store);
    let err = pipeline
        .run(
            || -> MoonxResult<InMemoryPostLogRepository> {
                Err(DatabaseError::new(DatabaseErrorKind::Connection("connection refused".into())).into())
            },
            evening(),
            false,
        )
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), MoonxErrorKind::Database(_)));
    assert!(poster.requests().is_empty());
}

#[tokio::test]
async fn test_dry_run_posts_and_logs_nothing() {
    let dir = TempDir::new().unwrap();
    let store = AuditStore::new(dir.path()).unwrap();
    let source = source("third_quarter");
    let poster = RecordingPoster::default();
    let log = SharedLog::with(InMemoryPostLogRepository::with_rows(vec![prior(9, "900", 1)]));

    let pipeline = MoonPipeline::new(&source, &poster, &store);
    let handle = log.clone();
    let outcome = pipeline
        .run(move || Ok(handle), evening(), true)
        .await
        .unwrap();

    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(outcome.stage(), RunStage::DbConnected);
    match outcome {
        RunOutcome::DryRun { text, reply_to } => {
            assert!(text.starts_with("malam ini bulan paruh kedua 🌗"));
            assert_eq!(reply_to.as_deref(), Some("900"));
        }
        other => panic!("expected DryRun, got {other:?}"),
    }
    assert!(poster.requests().is_empty());
    assert_eq!(log.rows().len(), 1);
}
