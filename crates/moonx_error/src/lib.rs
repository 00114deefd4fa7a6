//! Error types for moonx.
//!
//! This crate provides the error types shared by every moonx crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use moonx_error::{MoonxResult, HttpError};
//!
//! fn fetch_data() -> MoonxResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! match fetch_data() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod astronomy;
mod config;
#[cfg(feature = "database")]
mod database;
mod error;
mod http;
mod json;
mod social;
mod storage;

pub use astronomy::{AstronomyError, AstronomyErrorKind};
pub use config::ConfigError;
#[cfg(feature = "database")]
pub use database::{DatabaseError, DatabaseErrorKind};
pub use error::{MoonxError, MoonxErrorKind, MoonxResult};
pub use http::HttpError;
pub use json::JsonError;
pub use social::{SocialError, SocialErrorKind};
pub use storage::{StorageError, StorageErrorKind};
