//! Core data types for moonx.
//!
//! This crate holds the domain values shared by the fetcher, the poster and
//! the pipeline: the closed set of moon phases, their localized display
//! strings, the transient reading returned by the astronomy provider, and the
//! forward-only stage marker of a run.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod message;
mod phase;
mod reading;
mod stage;

pub use message::compose_message;
pub use phase::{MoonPhase, translate};
pub use reading::MoonPhaseReading;
pub use stage::RunStage;
