//! Astronomy provider client for moonx.
//!
//! Fetches the current moon phase for a fixed coordinate from the
//! ipgeolocation astronomy endpoint and keeps the raw response on disk for
//! audit.
//!
//! # Example
//!
//! ```rust,ignore
//! use moonx_astronomy::{AstronomyClient, fetch_and_audit};
//! use moonx_storage::AuditStore;
//!
//! # async fn example() -> moonx_error::MoonxResult<()> {
//! let client = AstronomyClient::builder("api-key").build()?;
//! let store = AuditStore::new("out")?;
//! let reading = fetch_and_audit(&client, &store).await?;
//! println!("{}", reading.code());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod fetch;

pub use client::{AstronomyClient, AstronomyClientBuilder, DEFAULT_ASTRONOMY_URL};
pub use fetch::{PhaseSource, fetch_and_audit};
