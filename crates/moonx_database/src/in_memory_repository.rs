//! In-memory post log for tests and dry runs.

use crate::{DatabaseResult, NewPostRecord, PostLogRepository, PostRecord};
use moonx_error::{DatabaseError, DatabaseErrorKind};

/// Post log held in a `Vec`, with ids assigned like a `SERIAL` column.
///
/// Writes can be made to fail on demand to exercise the path where a post
/// is live but never logged.
#[derive(Debug, Default, Clone)]
pub struct InMemoryPostLogRepository {
    rows: Vec<PostRecord>,
    next_id: i32,
    fail_writes: bool,
}

impl InMemoryPostLogRepository {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// A log pre-filled with rows, keeping their ids.
    pub fn with_rows(rows: Vec<PostRecord>) -> Self {
        let next_id = rows.iter().map(|r| r.id).max().unwrap_or(0);
        Self {
            rows,
            next_id,
            fail_writes: false,
        }
    }

    /// Make every subsequent `record_post` fail.
    pub fn fail_writes(mut self, fail: bool) -> Self {
        self.fail_writes = fail;
        self
    }

    /// All rows in insertion order.
    pub fn rows(&self) -> &[PostRecord] {
        &self.rows
    }
}

impl PostLogRepository for InMemoryPostLogRepository {
    fn last_post_id(&mut self) -> DatabaseResult<Option<String>> {
        Ok(self
            .rows
            .iter()
            .max_by_key(|row| row.id)
            .map(|row| row.tweet_id.clone()))
    }

    fn record_post(&mut self, new_record: NewPostRecord) -> DatabaseResult<PostRecord> {
        if self.fail_writes {
            return Err(DatabaseError::new(DatabaseErrorKind::Write(
                "simulated write failure".to_string(),
            )));
        }

        self.next_id += 1;
        let row = PostRecord {
            id: self.next_id,
            tweet_id: new_record.tweet_id,
            text: new_record.text,
            timestamp: new_record.timestamp,
            replied: new_record.replied,
            replied_with_id: new_record.replied_with_id,
        };
        self.rows.push(row.clone());
        Ok(row)
    }

    fn recent_posts(&mut self, limit: i64) -> DatabaseResult<Vec<PostRecord>> {
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        rows.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(rows)
    }
}
