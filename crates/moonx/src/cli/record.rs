//! Manual reconciliation of a live but unlogged post.

use chrono::Utc;
use moonx::{MoonxConfig, MoonxResult, NewPostRecord, PostLogRepository, PostgresPostLogRepository};
use tracing::info;

/// Append one log row describing a post that already exists.
///
/// The row becomes the newest one, so the next run replies to it.
pub fn record_post(
    config: &MoonxConfig,
    tweet_id: &str,
    text: &str,
    replied_with_id: Option<String>,
    timestamp: Option<i64>,
) -> MoonxResult<u8> {
    let timestamp = timestamp.unwrap_or_else(|| Utc::now().timestamp());
    let mut repo = PostgresPostLogRepository::connect(&config.secrets().database()?)?;
    let record = repo.record_post(NewPostRecord::new(tweet_id, text, timestamp, replied_with_id))?;

    info!(row_id = record.id, post_id = %record.tweet_id, "Recorded post by hand");
    println!("Logged {} as row {}", record.tweet_id, record.id);
    Ok(0)
}
