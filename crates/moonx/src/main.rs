//! moonx CLI binary.
//!
//! This binary provides command-line access to moonx:
//! - Run the scheduled fetch, post and log workflow
//! - Preview tonight's phase
//! - Manage and inspect the post log

use clap::Parser;
use moonx::{MoonxConfig, MoonxResult, init_logging};
use std::process::ExitCode;

mod cli;

use cli::{Cli, Commands, migrate, preview_phase, record_post, run_once, show_history};

async fn dispatch(command: Commands, config: &MoonxConfig) -> MoonxResult<u8> {
    match command {
        Commands::Run { dry_run } => run_once(config, dry_run).await,
        Commands::Phase => preview_phase(config).await,
        Commands::Migrate => migrate(config),
        Commands::History { limit, format } => show_history(config, limit, format),
        Commands::Record {
            tweet_id,
            text,
            replied_with_id,
            timestamp,
        } => record_post(config, &tweet_id, &text, replied_with_id, timestamp),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Parse command-line arguments
    let cli = Cli::parse();

    let config = match MoonxConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(1);
        }
    };

    let logging = config.settings().logging();
    if let Err(e) = init_logging(logging.level(), cli.verbose, cli.json_logs || *logging.json()) {
        eprintln!("{}", e);
        return ExitCode::from(1);
    }

    let command = cli.command.unwrap_or_default();
    match dispatch(command, &config).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!(error = %e, "moonx failed");
            eprintln!("{}", e);
            ExitCode::from(1)
        }
    }
}
