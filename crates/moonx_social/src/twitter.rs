//! X (Twitter) API v2 client.

use crate::{OAuth1Credentials, PostRequest, PostResponse, PostingService};
use async_trait::async_trait;
use moonx_error::{HttpError, MoonxResult, SocialError, SocialErrorKind};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Default API host.
pub const DEFAULT_TWITTER_URL: &str = "https://api.twitter.com";

const CREATE_TWEET_PATH: &str = "/2/tweets";

/// How requests are authenticated.
#[derive(Debug, Clone)]
pub enum TwitterAuth {
    /// OAuth 1.0a user context, signed per request.
    OAuth1(OAuth1Credentials),
    /// OAuth 2 user-context access token.
    Bearer(String),
}

#[derive(Debug, Serialize)]
struct CreateTweetBody<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply: Option<ReplySettings<'a>>,
}

#[derive(Debug, Serialize)]
struct ReplySettings<'a> {
    in_reply_to_tweet_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreateTweetResponse {
    data: Value,
}

/// Client for `POST /2/tweets`.
#[derive(Debug, Clone)]
pub struct TwitterClient {
    client: Client,
    base_url: String,
    auth: TwitterAuth,
}

impl TwitterClient {
    /// Create a client against the default API host.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn new(auth: TwitterAuth, timeout: Option<Duration>) -> MoonxResult<Self> {
        Self::with_base_url(auth, DEFAULT_TWITTER_URL, timeout)
    }

    /// Create a client against a specific API host.
    pub fn with_base_url(
        auth: TwitterAuth,
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> MoonxResult<Self> {
        let mut http = Client::builder();
        if let Some(timeout) = timeout {
            http = http.timeout(timeout);
        }
        let client = http
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        debug!(base_url = %base_url, "Creating Twitter client");
        Ok(Self {
            client,
            base_url,
            auth,
        })
    }

    fn authorization(&self, url: &str) -> MoonxResult<String> {
        match &self.auth {
            TwitterAuth::OAuth1(credentials) => {
                let nonce = uuid::Uuid::new_v4().simple().to_string();
                let timestamp = chrono::Utc::now().timestamp();
                credentials.authorization_header("POST", url, &[], &nonce, timestamp)
            }
            TwitterAuth::Bearer(token) => Ok(format!("Bearer {}", token)),
        }
    }
}

#[async_trait]
impl PostingService for TwitterClient {
    #[instrument(skip(self, request), fields(reply = request.is_reply(), text_len = request.text().len()))]
    async fn create_post(&self, request: &PostRequest) -> MoonxResult<PostResponse> {
        let url = format!("{}{}", self.base_url, CREATE_TWEET_PATH);
        let body = CreateTweetBody {
            text: request.text(),
            reply: request
                .in_reply_to()
                .as_deref()
                .map(|id| ReplySettings {
                    in_reply_to_tweet_id: id,
                }),
        };

        debug!("Sending create tweet request");
        let response = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, self.authorization(&url)?)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to send create tweet request");
                SocialError::new(SocialErrorKind::Request(e.to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Twitter API returned error");
            return Err(SocialError::new(SocialErrorKind::from_status(status.as_u16(), body)).into());
        }

        let parsed: CreateTweetResponse = response.json().await.map_err(|e| {
            error!(error = %e, "Failed to parse create tweet response");
            SocialError::new(SocialErrorKind::Parse(e.to_string()))
        })?;

        let id = parsed
            .data
            .get("id")
            .and_then(|id| match id {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .ok_or_else(|| {
                SocialError::new(SocialErrorKind::Parse(
                    "response data has no id".to_string(),
                ))
            })?;

        Ok(PostResponse::new(id, parsed.data))
    }
}
