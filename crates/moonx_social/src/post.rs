//! Posting seam, request/response types and the audited post step.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use derive_getters::Getters;
use moonx_error::MoonxResult;
use moonx_storage::{AuditStore, POST_METADATA_PREFIX, timestamped_name};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument, warn};

/// Text to publish, optionally threaded beneath an earlier post.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PostRequest {
    /// Message body.
    text: String,
    /// Identifier of the post to reply to.
    in_reply_to: Option<String>,
}

impl PostRequest {
    /// A standalone top-level post.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            in_reply_to: None,
        }
    }

    /// Thread this post beneath `target` when one is given.
    pub fn replying_to(mut self, target: Option<String>) -> Self {
        self.in_reply_to = target;
        self
    }

    /// Whether the post is a reply.
    pub fn is_reply(&self) -> bool {
        self.in_reply_to.is_some()
    }
}

/// What the posting service returned for a created post.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct PostResponse {
    /// Identifier of the new post.
    id: String,
    /// The service's `data` object, kept verbatim for audit.
    data: Value,
}

impl PostResponse {
    /// Wrap a created post's identifier and data object.
    pub fn new(id: impl Into<String>, data: Value) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }
}

/// A service that can publish posts.
#[async_trait]
pub trait PostingService: Send + Sync {
    /// Create one post. Never retried.
    ///
    /// # Errors
    ///
    /// Returns a `SocialError` when authentication fails, the service
    /// rejects the post, rate-limits it, or cannot be reached.
    async fn create_post(&self, request: &PostRequest) -> MoonxResult<PostResponse>;
}

/// Publish a post and save the service's response data to a timestamped file.
///
/// The file is named from `now` (local time of the run). A failure to write
/// the audit file is logged but does not undo or fail the post: the post is
/// already live.
#[instrument(skip_all, fields(reply = request.is_reply()))]
pub async fn post_with_audit(
    service: &dyn PostingService,
    request: &PostRequest,
    store: &AuditStore,
    now: &DateTime<FixedOffset>,
) -> MoonxResult<PostResponse> {
    match request.in_reply_to() {
        Some(target) => info!(in_reply_to = %target, "Replying to previous post"),
        None => info!("Posting first post (not a reply)"),
    }

    let response = service.create_post(request).await?;
    info!(post_id = %response.id(), "Post created");

    let name = timestamped_name(POST_METADATA_PREFIX, now);
    match store.write_unique(&name, response.data()).await {
        Ok(path) => info!(path = %path.display(), "Saved post metadata"),
        Err(e) => warn!(error = %e, "Failed to save post metadata"),
    }

    Ok(response)
}
