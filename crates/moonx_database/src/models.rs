//! Diesel models for the post log.

use crate::schema::tweet_logs;
use diesel::prelude::*;
use serde::Serialize;

/// Database row for the `tweet_logs` table.
///
/// Rows are append-only; `id` order is insertion order and is what "most
/// recent" means, regardless of `timestamp`.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Identifiable, Selectable, Serialize)]
#[diesel(table_name = tweet_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PostRecord {
    pub id: i32,
    pub tweet_id: String,
    pub text: String,
    pub timestamp: i64,
    pub replied: bool,
    pub replied_with_id: Option<String>,
}

/// Insertable struct for appending one published post.
#[derive(Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = tweet_logs)]
pub struct NewPostRecord {
    pub tweet_id: String,
    pub text: String,
    pub timestamp: i64,
    pub replied: bool,
    pub replied_with_id: Option<String>,
}

impl NewPostRecord {
    /// Describe a published post. `replied` follows from `replied_with_id`.
    pub fn new(
        tweet_id: impl Into<String>,
        text: impl Into<String>,
        timestamp: i64,
        replied_with_id: Option<String>,
    ) -> Self {
        Self {
            tweet_id: tweet_id.into(),
            text: text.into(),
            timestamp,
            replied: replied_with_id.is_some(),
            replied_with_id,
        }
    }
}
