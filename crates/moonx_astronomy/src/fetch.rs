//! Fetch step: read the phase and keep the raw payload for audit.

use crate::AstronomyClient;
use async_trait::async_trait;
use moonx_core::MoonPhaseReading;
use moonx_error::{AstronomyErrorKind, MoonxError, MoonxErrorKind, MoonxResult};
use moonx_storage::{AuditStore, RAW_ASTRONOMY_FILE};
use serde_json::Value;
use tracing::{info, instrument, warn};

/// Anything that can produce a moon phase reading.
#[async_trait]
pub trait PhaseSource: Send + Sync {
    /// Fetch one reading.
    async fn fetch_reading(&self) -> MoonxResult<MoonPhaseReading>;
}

#[async_trait]
impl PhaseSource for AstronomyClient {
    async fn fetch_reading(&self) -> MoonxResult<MoonPhaseReading> {
        self.fetch().await
    }
}

/// Body of a non-success provider response, as JSON when it parses.
fn provider_error_body(err: &MoonxError) -> Option<Value> {
    match err.kind() {
        MoonxErrorKind::Astronomy(e) => match &e.kind {
            AstronomyErrorKind::Api { message, .. } => Some(
                serde_json::from_str(message).unwrap_or_else(|_| Value::String(message.clone())),
            ),
            _ => None,
        },
        _ => None,
    }
}

/// Fetch a reading and overwrite `moon_raw.json` with its raw payload.
///
/// The audit file is written before the code is judged, so an unrecognized
/// phase still leaves the offending payload on disk. A provider error
/// response (bad key, quota) is saved the same way before the error is
/// returned.
#[instrument(skip_all)]
pub async fn fetch_and_audit(
    source: &dyn PhaseSource,
    store: &AuditStore,
) -> MoonxResult<MoonPhaseReading> {
    let reading = match source.fetch_reading().await {
        Ok(reading) => reading,
        Err(e) => {
            if let Some(body) = provider_error_body(&e) {
                match store.write_overwrite(RAW_ASTRONOMY_FILE, &body).await {
                    Ok(path) => info!(path = %path.display(), "Saved astronomy error response"),
                    Err(write_err) => {
                        warn!(error = %write_err, "Failed to save astronomy error response")
                    }
                }
            }
            return Err(e);
        }
    };
    let path = store.write_overwrite(RAW_ASTRONOMY_FILE, reading.raw()).await?;
    info!(path = %path.display(), code = %reading.code(), "Saved raw astronomy response");
    Ok(reading)
}
