//! moonx: posts tonight's moon phase and keeps a reply-threaded log.
//!
//! Each run asks an astronomy provider for the current phase, translates it
//! to an Indonesian display string, posts it to X as a reply to the previous
//! run's post, and appends the new post to a PostgreSQL log.
//!
//! # Architecture
//!
//! moonx is organized as a workspace with focused crates:
//!
//! - `moonx_error` - Error types
//! - `moonx_core` - Phase codes, translation, message text, run stages
//! - `moonx_storage` - Audit files for raw provider and service responses
//! - `moonx_astronomy` - Astronomy provider client
//! - `moonx_social` - Posting service trait and X API client
//! - `moonx_database` - PostgreSQL post log
//!
//! This crate holds configuration, logging setup and the run pipeline, and
//! re-exports the rest for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod pipeline;
mod telemetry;

pub use config::{
    DATABASE_URL, EndpointSettings, HttpSettings, IPGEO_API_KEY, LocationSettings,
    LoggingSettings, MoonxConfig, OutputSettings, PG_DB, PG_HOST, PG_PASSWORD, PG_PORT, PG_USER,
    Secrets, Settings, TWITTER_ACCESS_SECRET, TWITTER_ACCESS_TOKEN, TWITTER_API_KEY,
    TWITTER_API_SECRET, TWITTER_BEARER,
};
pub use pipeline::{MoonPipeline, RunOutcome, fetch_phase};
pub use telemetry::init_logging;

pub use moonx_astronomy::{AstronomyClient, AstronomyClientBuilder, PhaseSource, fetch_and_audit};
pub use moonx_core::{MoonPhase, MoonPhaseReading, RunStage, compose_message, translate};
pub use moonx_database::{
    InMemoryPostLogRepository, NewPostRecord, PgSettings, PostLogRepository, PostRecord,
    PostgresPostLogRepository, run_migrations,
};
pub use moonx_error::{ConfigError, JsonError, MoonxError, MoonxErrorKind, MoonxResult};
pub use moonx_social::{
    OAuth1Credentials, PostRequest, PostResponse, PostingService, TwitterAuth, TwitterClient,
    post_with_audit,
};
pub use moonx_storage::AuditStore;
