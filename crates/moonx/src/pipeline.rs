//! The fetch, translate, post, log sequence.

use chrono::{DateTime, FixedOffset};
use moonx_astronomy::{PhaseSource, fetch_and_audit};
use moonx_core::{MoonPhase, MoonPhaseReading, RunStage, compose_message};
use moonx_database::{NewPostRecord, PostLogRepository, PostRecord};
use moonx_error::{AstronomyError, AstronomyErrorKind, MoonxError, MoonxResult};
use moonx_social::{PostRequest, PostingService, post_with_audit};
use moonx_storage::AuditStore;
use tracing::{error, info, instrument, warn};

/// How a run ended once the database was reachable.
///
/// Failures before the database is reached (configuration, fetch, unknown
/// phase, connection) are returned as `Err` instead and exit with status 1.
#[derive(Debug)]
pub enum RunOutcome {
    /// Posted and logged.
    Posted {
        /// The committed log row
        record: PostRecord,
    },
    /// Stopped before posting on request.
    DryRun {
        /// Message that would have been posted
        text: String,
        /// Post it would have replied to
        reply_to: Option<String>,
    },
    /// The posting service refused or could not be reached; nothing logged.
    PostFailed {
        /// Message that was not posted
        text: String,
        /// Intended reply target
        reply_to: Option<String>,
        /// Classified posting error
        error: MoonxError,
    },
    /// The post is live but its log row was not written.
    LogFailed {
        /// Identifier of the live post
        post_id: String,
        /// Posted message
        text: String,
        /// Post it replied to
        reply_to: Option<String>,
        /// Database error
        error: MoonxError,
    },
}

impl RunOutcome {
    /// Process exit status for this outcome.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Posted { .. } | Self::DryRun { .. } => 0,
            Self::PostFailed { .. } => 2,
            Self::LogFailed { .. } => 3,
        }
    }

    /// Where the run stopped.
    pub fn stage(&self) -> RunStage {
        match self {
            Self::Posted { .. } => RunStage::Done,
            Self::DryRun { .. } => RunStage::DbConnected,
            Self::PostFailed { .. } | Self::LogFailed { .. } => RunStage::Failed,
        }
    }
}

fn advance(stage: &mut RunStage) {
    *stage = stage.next();
    info!(stage = %stage, "Stage reached");
}

fn abort(stage: RunStage, e: impl Into<MoonxError>) -> MoonxError {
    let e = e.into();
    error!(stage = %stage, next = %RunStage::Failed, error = %e, "Run aborted");
    e
}

/// Fetch the current reading, audit it and translate its code.
///
/// # Errors
///
/// Fails on any fetch error or when the code is not one of the eight known
/// phases.
pub async fn fetch_phase(
    source: &dyn PhaseSource,
    store: &AuditStore,
) -> MoonxResult<(MoonPhaseReading, MoonPhase)> {
    let reading = fetch_and_audit(source, store).await?;
    let phase = reading.phase().ok_or_else(|| unknown_phase(&reading))?;
    Ok((reading, phase))
}

fn unknown_phase(reading: &MoonPhaseReading) -> AstronomyError {
    AstronomyError::new(AstronomyErrorKind::UnknownPhase(reading.code().clone()))
}

/// One configured run: where the phase comes from, where posts go and where
/// audit files land.
pub struct MoonPipeline<'a> {
    source: &'a dyn PhaseSource,
    poster: &'a dyn PostingService,
    store: &'a AuditStore,
}

impl<'a> MoonPipeline<'a> {
    /// Wire a pipeline from its collaborators.
    pub fn new(
        source: &'a dyn PhaseSource,
        poster: &'a dyn PostingService,
        store: &'a AuditStore,
    ) -> Self {
        Self {
            source,
            poster,
            store,
        }
    }

    /// Run every stage once, in order.
    ///
    /// `connect` is called only after the phase is known, so an unknown
    /// phase never touches the database. The repository is dropped, closing
    /// its connection, on every return path.
    ///
    /// # Errors
    ///
    /// Returns `Err` for failures before anything is posted. Posting and
    /// logging failures are reported through [`RunOutcome`].
    #[instrument(skip_all, fields(dry_run = dry_run, now = %now))]
    pub async fn run<R, F>(
        &self,
        connect: F,
        now: DateTime<FixedOffset>,
        dry_run: bool,
    ) -> MoonxResult<RunOutcome>
    where
        R: PostLogRepository,
        F: FnOnce() -> MoonxResult<R>,
    {
        let mut stage = RunStage::Init;
        info!(stage = %stage, "Starting run");

        let reading = fetch_and_audit(self.source, self.store)
            .await
            .map_err(|e| abort(stage, e))?;
        advance(&mut stage);

        let phase = reading
            .phase()
            .ok_or_else(|| abort(stage, unknown_phase(&reading)))?;
        let timestamp = now.timestamp();
        let text = compose_message(phase, timestamp);
        info!(phase = %phase, text = %text, "Composed message");
        advance(&mut stage);

        let mut repo = connect().map_err(|e| abort(stage, e))?;
        let reply_to = repo.last_post_id().map_err(|e| abort(stage, e))?;
        advance(&mut stage);

        if dry_run {
            info!(reply_to = ?reply_to, "Dry run, not posting");
            return Ok(RunOutcome::DryRun { text, reply_to });
        }

        let request = PostRequest::new(text.as_str()).replying_to(reply_to.clone());
        let response = match post_with_audit(self.poster, &request, self.store, &now).await {
            Ok(response) => response,
            Err(error) => {
                error!(stage = %stage, error = %error, "Post failed, nothing logged");
                return Ok(RunOutcome::PostFailed {
                    text,
                    reply_to,
                    error,
                });
            }
        };
        advance(&mut stage);

        let new_record = NewPostRecord::new(response.id(), text.as_str(), timestamp, reply_to.clone());
        let record = match repo.record_post(new_record) {
            Ok(record) => record,
            Err(e) => {
                let error = MoonxError::from(e);
                warn!(
                    stage = %stage,
                    post_id = %response.id(),
                    error = %error,
                    "Post is live but was not logged; append it with `moonx record`"
                );
                return Ok(RunOutcome::LogFailed {
                    post_id: response.id().clone(),
                    text,
                    reply_to,
                    error,
                });
            }
        };
        advance(&mut stage);

        info!(row_id = record.id, post_id = %record.tweet_id, "Logged post");
        advance(&mut stage);
        Ok(RunOutcome::Posted { record })
    }
}
