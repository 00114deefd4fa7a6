//! Configuration for a moonx run.
//!
//! Non-secret settings are layered with the `config` crate:
//! - Bundled defaults (include_str! from moonx.toml)
//! - User overrides (~/.config/moonx/moonx.toml, then ./moonx.toml)
//! - An explicit `--config` file, when given
//! - `MOONX_<SECTION>__<KEY>` environment variables
//!
//! Credentials are read from the environment once, at startup, and kept in
//! [`Secrets`]. Nothing else in the crate touches the process environment.

use chrono::FixedOffset;
use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use moonx_database::PgSettings;
use moonx_error::{ConfigError, MoonxResult};
use moonx_social::{OAuth1Credentials, TwitterAuth};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

const DEFAULT_CONFIG: &str = include_str!("../moonx.toml");

/// Astronomy provider API key.
pub const IPGEO_API_KEY: &str = "IPGEO_API_KEY";
/// OAuth 2 user-context token, used when the OAuth1 set is incomplete.
pub const TWITTER_BEARER: &str = "TWITTER_BEARER";
/// OAuth1 consumer key.
pub const TWITTER_API_KEY: &str = "TWITTER_API_KEY";
/// OAuth1 consumer secret.
pub const TWITTER_API_SECRET: &str = "TWITTER_API_SECRET";
/// OAuth1 access token.
pub const TWITTER_ACCESS_TOKEN: &str = "TWITTER_ACCESS_TOKEN";
/// OAuth1 access token secret.
pub const TWITTER_ACCESS_SECRET: &str = "TWITTER_ACCESS_SECRET";
/// Full connection URL; overrides the `PG_*` set.
pub const DATABASE_URL: &str = "DATABASE_URL";
/// Database host.
pub const PG_HOST: &str = "PG_HOST";
/// Database name.
pub const PG_DB: &str = "PG_DB";
/// Database role.
pub const PG_USER: &str = "PG_USER";
/// Database password (optional).
pub const PG_PASSWORD: &str = "PG_PASSWORD";
/// Database port (default 5432).
pub const PG_PORT: &str = "PG_PORT";

const SECRET_VARS: [&str; 12] = [
    IPGEO_API_KEY,
    TWITTER_BEARER,
    TWITTER_API_KEY,
    TWITTER_API_SECRET,
    TWITTER_ACCESS_TOKEN,
    TWITTER_ACCESS_SECRET,
    DATABASE_URL,
    PG_HOST,
    PG_DB,
    PG_USER,
    PG_PASSWORD,
    PG_PORT,
];

/// Coordinate the phase is requested for.
#[derive(Debug, Clone, PartialEq, Deserialize, Getters)]
pub struct LocationSettings {
    latitude: f64,
    longitude: f64,
}

/// Endpoint of one external service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Getters)]
pub struct EndpointSettings {
    base_url: String,
}

/// Where audit files go and which local time names them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Getters)]
pub struct OutputSettings {
    directory: PathBuf,
    utc_offset_hours: i32,
}

/// HTTP client settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Getters)]
pub struct HttpSettings {
    timeout_seconds: u64,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Getters)]
pub struct LoggingSettings {
    level: String,
    json: bool,
}

/// Non-secret settings, merged from every configuration layer.
#[derive(Debug, Clone, PartialEq, Deserialize, Getters)]
pub struct Settings {
    location: LocationSettings,
    astronomy: EndpointSettings,
    twitter: EndpointSettings,
    output: OutputSettings,
    http: HttpSettings,
    logging: LoggingSettings,
}

fn build_error(e: config::ConfigError) -> ConfigError {
    ConfigError::new(format!("Failed to build configuration: {}", e))
}

fn parse_error(e: config::ConfigError) -> ConfigError {
    ConfigError::new(format!("Failed to parse configuration: {}", e))
}

impl Settings {
    /// Only the bundled defaults.
    pub fn bundled() -> MoonxResult<Self> {
        Ok(Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .map_err(build_error)?
            .try_deserialize()
            .map_err(parse_error)?)
    }

    /// Load settings with precedence: env > explicit file > ./moonx.toml >
    /// ~/.config/moonx/moonx.toml > bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing or any layer fails to
    /// parse.
    pub fn load(explicit: Option<&Path>) -> MoonxResult<Self> {
        Self::load_with_env(explicit, None)
    }

    /// Like [`Settings::load`], reading `MOONX_*` overrides from `vars`
    /// instead of the process environment when given.
    pub fn load_with_env(
        explicit: Option<&Path>,
        vars: Option<config::Map<String, String>>,
    ) -> MoonxResult<Self> {
        debug!("Loading configuration");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("moonx").join("moonx.toml");
            builder = builder.add_source(File::from(user_config).required(false));
        }

        builder = builder.add_source(File::with_name("moonx").required(false));

        if let Some(path) = explicit {
            debug!(path = %path.display(), "Adding explicit configuration file");
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("MOONX")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(vars),
        );

        Ok(builder
            .build()
            .map_err(build_error)?
            .try_deserialize()
            .map_err(parse_error)?)
    }

    /// The configured local time offset.
    pub fn utc_offset(&self) -> MoonxResult<FixedOffset> {
        let hours = self.output.utc_offset_hours;
        Ok(hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| ConfigError::new(format!("Invalid utc_offset_hours: {}", hours)))?)
    }

    /// The configured HTTP timeout.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }
}

/// Credentials captured from the environment.
#[derive(Clone, Default)]
pub struct Secrets {
    values: HashMap<&'static str, String>,
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut present: Vec<&&str> = self.values.keys().collect();
        present.sort();
        f.debug_struct("Secrets").field("present", &present).finish()
    }
}

impl Secrets {
    /// Read every known credential variable from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through a lookup function. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let values = SECRET_VARS
            .iter()
            .filter_map(|&name| {
                lookup(name)
                    .filter(|value| !value.trim().is_empty())
                    .map(|value| (name, value))
            })
            .collect();
        Self { values }
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    fn require(&self, name: &str) -> MoonxResult<&str> {
        Ok(self
            .get(name)
            .ok_or_else(|| ConfigError::new(format!("{} is not set", name)))?)
    }

    /// The astronomy provider key.
    pub fn ipgeo_api_key(&self) -> MoonxResult<&str> {
        self.require(IPGEO_API_KEY)
    }

    /// Posting credentials: the full OAuth1 set when present, else the bearer
    /// token.
    pub fn twitter_auth(&self) -> MoonxResult<TwitterAuth> {
        let oauth1 = [
            TWITTER_API_KEY,
            TWITTER_API_SECRET,
            TWITTER_ACCESS_TOKEN,
            TWITTER_ACCESS_SECRET,
        ];
        let missing: Vec<&str> = oauth1
            .iter()
            .copied()
            .filter(|name| self.get(name).is_none())
            .collect();

        if missing.is_empty() {
            return Ok(TwitterAuth::OAuth1(OAuth1Credentials::new(
                self.require(TWITTER_API_KEY)?,
                self.require(TWITTER_API_SECRET)?,
                self.require(TWITTER_ACCESS_TOKEN)?,
                self.require(TWITTER_ACCESS_SECRET)?,
            )));
        }

        match self.get(TWITTER_BEARER) {
            Some(token) => {
                debug!(missing = ?missing, "OAuth1 set incomplete, using bearer token");
                Ok(TwitterAuth::Bearer(token.to_string()))
            }
            None => Err(ConfigError::new(format!(
                "Posting credentials missing: set {} or {}",
                missing.join(", "),
                TWITTER_BEARER
            ))
            .into()),
        }
    }

    /// Database location: `DATABASE_URL` when set, else the `PG_*` set.
    pub fn database(&self) -> MoonxResult<PgSettings> {
        if let Some(url) = self.get(DATABASE_URL) {
            return Ok(PgSettings::from_url(url));
        }

        let port = match self.get(PG_PORT) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::new(format!("{} is not a port: {}", PG_PORT, e)))?,
            None => 5432,
        };

        Ok(PgSettings::Parts {
            host: self.require(PG_HOST)?.to_string(),
            database: self.require(PG_DB)?.to_string(),
            user: self.require(PG_USER)?.to_string(),
            password: self.get(PG_PASSWORD).map(str::to_string),
            port,
        })
    }
}

/// Everything a run needs, built once and passed by reference.
#[derive(Debug, Clone, Getters)]
pub struct MoonxConfig {
    settings: Settings,
    secrets: Secrets,
}

impl MoonxConfig {
    /// Combine settings and secrets.
    pub fn new(settings: Settings, secrets: Secrets) -> Self {
        Self { settings, secrets }
    }

    /// Load layered settings and capture credentials from the environment.
    ///
    /// A `.env` file in the working directory is honoured.
    pub fn load(explicit: Option<&Path>) -> MoonxResult<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "Loaded .env");
        }
        Ok(Self::new(Settings::load(explicit)?, Secrets::from_env()))
    }
}
