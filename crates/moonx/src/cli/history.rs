//! Post log maintenance and listing handlers.

use super::OutputFormat;
use moonx::{
    JsonError, MoonxConfig, MoonxResult, PostLogRepository, PostgresPostLogRepository,
    run_migrations,
};
use tracing::info;

fn connect(config: &MoonxConfig) -> MoonxResult<PostgresPostLogRepository> {
    Ok(PostgresPostLogRepository::connect(&config.secrets().database()?)?)
}

/// Apply pending migrations to the post log database.
pub fn migrate(config: &MoonxConfig) -> MoonxResult<u8> {
    let mut repo = connect(config)?;
    let applied = run_migrations(repo.connection_mut())?;

    if applied.is_empty() {
        println!("Post log schema is up to date");
    } else {
        for version in &applied {
            info!(version = %version, "Applied migration");
            println!("Applied {}", version);
        }
    }
    Ok(0)
}

/// Print the most recent log rows.
pub fn show_history(config: &MoonxConfig, limit: i64, format: OutputFormat) -> MoonxResult<u8> {
    let mut repo = connect(config)?;
    let rows = repo.recent_posts(limit)?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&rows)
                .map_err(|e| JsonError::new(format!("Failed to serialize log rows: {}", e)))?;
            println!("{}", json);
        }
        OutputFormat::Human => {
            if rows.is_empty() {
                println!("No posts logged yet");
            } else {
                println!("{:<6} {:<22} {:<12} {:<22} TEXT", "ID", "POST", "TIMESTAMP", "REPLY TO");
                for row in &rows {
                    println!(
                        "{:<6} {:<22} {:<12} {:<22} {}",
                        row.id,
                        row.tweet_id,
                        row.timestamp,
                        row.replied_with_id.as_deref().unwrap_or("-"),
                        row.text
                    );
                }
            }
        }
    }
    Ok(0)
}
