//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// moonx - post tonight's moon phase as a reply-threaded series
#[derive(Parser, Debug)]
#[command(name = "moonx")]
#[command(about = "Post tonight's moon phase as a reply to the previous post", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON objects
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Additional configuration file, layered over the defaults
    #[arg(long, global = true, env = "MOONX_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Fetch, translate, post and log (the scheduled workflow)
    Run {
        /// Stop before posting; nothing is posted or logged
        #[arg(long)]
        dry_run: bool,
    },

    /// Fetch and translate the current phase without posting
    Phase,

    /// Create or update the post log table
    Migrate,

    /// Show the most recent log rows
    History {
        /// Maximum number of rows to display (at least 1)
        #[arg(long, default_value = "10", value_parser = clap::value_parser!(i64).range(1..))]
        limit: i64,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Append a log row by hand for a post that is live but unlogged
    Record {
        /// Identifier of the live post
        #[arg(long)]
        tweet_id: String,

        /// Text of the live post
        #[arg(long)]
        text: String,

        /// Post it replied to, if any
        #[arg(long)]
        replied_with_id: Option<String>,

        /// Epoch seconds of the post (defaults to now)
        #[arg(long)]
        timestamp: Option<i64>,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Self::Run { dry_run: false }
    }
}

/// Output format for listings
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_bare_invocation_runs_the_workflow() {
        let cli = Cli::try_parse_from(["moonx"]).unwrap();
        assert_eq!(cli.command.unwrap_or_default(), Commands::Run { dry_run: false });
    }

    #[test]
    fn test_history_limit_must_be_positive() {
        assert!(Cli::try_parse_from(["moonx", "history", "--limit", "-1"]).is_err());
        assert!(Cli::try_parse_from(["moonx", "history", "--limit", "0"]).is_err());

        let cli = Cli::try_parse_from(["moonx", "history", "--limit", "3"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::History {
                limit: 3,
                format: OutputFormat::Human,
            })
        );
    }

    #[test]
    fn test_record_requires_id_and_text() {
        assert!(Cli::try_parse_from(["moonx", "record", "--tweet-id", "1"]).is_err());

        let cli = Cli::try_parse_from([
            "moonx",
            "record",
            "--tweet-id",
            "101",
            "--text",
            "malam ini bulan purnama 🌕 (1741953600)",
            "--replied-with-id",
            "100",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Record {
                tweet_id: "101".into(),
                text: "malam ini bulan purnama 🌕 (1741953600)".into(),
                replied_with_id: Some("100".into()),
                timestamp: None,
            })
        );
    }
}
