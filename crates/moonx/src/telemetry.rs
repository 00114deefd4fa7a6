//! Log output setup.

use moonx_error::{ConfigError, MoonxResult};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `level` applies (raised to `debug`
/// by `verbose`). `json` switches to one JSON object per event.
///
/// # Errors
///
/// Returns an error if a subscriber is already installed.
pub fn init_logging(level: &str, verbose: bool, json: bool) -> MoonxResult<()> {
    let default_directive = if verbose { "debug" } else { level };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(false))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .try_init()
    };

    installed.map_err(|e| ConfigError::new(format!("Failed to initialize logging: {}", e)))?;
    Ok(())
}
