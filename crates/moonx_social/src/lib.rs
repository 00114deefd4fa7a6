//! Posting service integration for moonx.
//!
//! This crate submits the composed moon phase message to the X (Twitter)
//! API, threading it beneath the previous post when a reply target is known.
//!
//! # Features
//!
//! - OAuth 1.0a user-context signing (HMAC-SHA1) or OAuth 2 bearer tokens
//! - Reply threading via `reply.in_reply_to_tweet_id`
//! - Failure classification (authentication, rate limit, rejection)
//! - Per-post audit file of the service response

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod oauth;
mod post;
mod twitter;

pub use oauth::{OAuth1Credentials, signature_base_string};
pub use post::{PostRequest, PostResponse, PostingService, post_with_audit};
pub use twitter::{DEFAULT_TWITTER_URL, TwitterAuth, TwitterClient};
