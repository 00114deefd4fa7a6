//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the moonx binary.

mod commands;
mod history;
mod record;
mod run;

pub use commands::{Cli, Commands, OutputFormat};
pub use history::{migrate, show_history};
pub use record::record_post;
pub use run::{preview_phase, run_once};
