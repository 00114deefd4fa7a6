//! HTTP client for the astronomy endpoint.

use moonx_core::MoonPhaseReading;
use moonx_error::{AstronomyError, AstronomyErrorKind, HttpError, MoonxResult};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Default astronomy endpoint.
pub const DEFAULT_ASTRONOMY_URL: &str = "https://api.ipgeolocation.io/astronomy";

/// Jakarta, where the posts are written for.
const DEFAULT_LATITUDE: f64 = -6.2;
const DEFAULT_LONGITUDE: f64 = 106.8167;

/// Client for the ipgeolocation astronomy endpoint.
///
/// Issues exactly one GET per [`AstronomyClient::fetch`]; there is no retry.
#[derive(Debug, Clone)]
pub struct AstronomyClient {
    client: Client,
    base_url: String,
    api_key: String,
    latitude: f64,
    longitude: f64,
}

impl AstronomyClient {
    /// Start building a client for the given API key.
    pub fn builder(api_key: impl Into<String>) -> AstronomyClientBuilder {
        AstronomyClientBuilder {
            api_key: api_key.into(),
            base_url: None,
            latitude: None,
            longitude: None,
            timeout: None,
        }
    }

    /// Coordinate the phase is requested for.
    pub fn coordinate(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    /// Fetch the current moon phase reading.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the provider answers with a
    /// non-success status, or the body is not JSON.
    #[instrument(skip(self), fields(lat = self.latitude, long = self.longitude))]
    pub async fn fetch(&self) -> MoonxResult<MoonPhaseReading> {
        debug!("Requesting astronomy data");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("apiKey", self.api_key.clone()),
                ("lat", format!("{:.4}", self.latitude)),
                ("long", format!("{:.4}", self.longitude)),
            ])
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Astronomy request failed");
                AstronomyError::new(AstronomyErrorKind::Request(e.without_url().to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Astronomy API returned error");
            return Err(AstronomyError::new(AstronomyErrorKind::Api {
                status: status.as_u16(),
                message: body,
            })
            .into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| HttpError::new(format!("Failed to read astronomy body: {}", e)))?;
        let raw: Value = serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, "Astronomy response is not JSON");
            AstronomyError::new(AstronomyErrorKind::Parse(e.to_string()))
        })?;

        let reading = MoonPhaseReading::from_payload(raw);
        debug!(code = %reading.code(), "Received moon phase");
        Ok(reading)
    }
}

/// Builder for [`AstronomyClient`].
#[derive(Debug)]
pub struct AstronomyClientBuilder {
    api_key: String,
    base_url: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    timeout: Option<Duration>,
}

impl AstronomyClientBuilder {
    /// Override the endpoint URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the coordinate to request the phase for.
    pub fn coordinate(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Set a whole-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn build(self) -> MoonxResult<AstronomyClient> {
        let mut http = Client::builder();
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }
        let client = http
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;

        Ok(AstronomyClient {
            client,
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_ASTRONOMY_URL.to_string()),
            api_key: self.api_key,
            latitude: self.latitude.unwrap_or(DEFAULT_LATITUDE),
            longitude: self.longitude.unwrap_or(DEFAULT_LONGITUDE),
        })
    }
}
