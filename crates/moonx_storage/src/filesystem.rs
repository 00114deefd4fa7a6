//! Filesystem-backed audit store.

use chrono::{DateTime, TimeZone};
use moonx_error::{MoonxResult, StorageError, StorageErrorKind};
use serde::Serialize;
use serde_json::Value;
use std::fmt::Display;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// File holding the most recent astronomy response.
pub const RAW_ASTRONOMY_FILE: &str = "moon_raw.json";

/// Prefix of the per-post service response files.
pub const POST_METADATA_PREFIX: &str = "tweet_metadata";

/// Build `{prefix}_{YYYYmmdd_HHMMSS}.json` from a local timestamp.
///
/// # Examples
///
/// ```
/// use chrono::{FixedOffset, TimeZone};
/// use moonx_storage::timestamped_name;
///
/// let gmt7 = FixedOffset::east_opt(7 * 3600).unwrap();
/// let at = gmt7.with_ymd_and_hms(2025, 3, 14, 19, 30, 5).unwrap();
/// assert_eq!(timestamped_name("tweet_metadata", &at), "tweet_metadata_20250314_193005.json");
/// ```
pub fn timestamped_name<Tz>(prefix: &str, at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("{}_{}.json", prefix, at.format("%Y%m%d_%H%M%S"))
}

/// Directory of pretty-printed JSON audit files.
///
/// Overwrites go through a temp file + rename so a crash never leaves a
/// half-written `moon_raw.json` behind.
#[derive(Debug, Clone)]
pub struct AuditStore {
    base_path: PathBuf,
}

impl AuditStore {
    /// Open an audit store, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> MoonxResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::debug!(path = %base_path.display(), "Opened audit store");
        Ok(Self { base_path })
    }

    /// Directory the store writes into.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn resolve(&self, name: &str) -> MoonxResult<PathBuf> {
        let plain = Path::new(name)
            .file_name()
            .is_some_and(|file_name| file_name == name);
        if !plain {
            return Err(StorageError::new(StorageErrorKind::InvalidName(name.to_string())).into());
        }
        Ok(self.base_path.join(name))
    }

    fn render(document: &impl Serialize) -> MoonxResult<Vec<u8>> {
        serde_json::to_vec_pretty(document).map_err(|e| {
            StorageError::new(StorageErrorKind::Serialization(e.to_string())).into()
        })
    }

    /// Write `document` to `name`, replacing any earlier file.
    #[tracing::instrument(skip(self, document))]
    pub async fn write_overwrite(
        &self,
        name: &str,
        document: &impl Serialize,
    ) -> MoonxResult<PathBuf> {
        let path = self.resolve(name)?;
        let bytes = Self::render(document)?;
        let temp_path = self.base_path.join(format!(".{}.tmp", name));

        tokio::fs::write(&temp_path, &bytes).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;
        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

        tracing::debug!(path = %path.display(), size = bytes.len(), "Audit file written");
        Ok(path)
    }

    /// Write `document` to `name` without touching an existing file.
    ///
    /// When `name` is taken (two runs in the same second), a numeric suffix
    /// is inserted before the extension: `x.json`, `x_1.json`, `x_2.json`.
    #[tracing::instrument(skip(self, document))]
    pub async fn write_unique(&self, name: &str, document: &impl Serialize) -> MoonxResult<PathBuf> {
        let first = self.resolve(name)?;
        let bytes = Self::render(document)?;
        let (stem, extension) = match name.rsplit_once('.') {
            Some((stem, extension)) => (stem.to_string(), format!(".{}", extension)),
            None => (name.to_string(), String::new()),
        };

        let mut attempt = 0u32;
        let mut path = first;
        loop {
            match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(mut file) => {
                    file.write_all(&bytes).await.map_err(|e| {
                        StorageError::new(StorageErrorKind::FileWrite(format!(
                            "{}: {}",
                            path.display(),
                            e
                        )))
                    })?;
                    file.flush().await.map_err(|e| {
                        StorageError::new(StorageErrorKind::FileWrite(format!(
                            "{}: {}",
                            path.display(),
                            e
                        )))
                    })?;
                    tracing::debug!(path = %path.display(), size = bytes.len(), "Audit file written");
                    return Ok(path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    attempt += 1;
                    path = self
                        .base_path
                        .join(format!("{}_{}{}", stem, attempt, extension));
                }
                Err(e) => {
                    return Err(StorageError::new(StorageErrorKind::FileWrite(format!(
                        "{}: {}",
                        path.display(),
                        e
                    )))
                    .into());
                }
            }
        }
    }

    /// Read an audit file back as JSON.
    #[tracing::instrument(skip(self))]
    pub async fn read(&self, name: &str) -> MoonxResult<Value> {
        let path = self.resolve(name)?;
        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        serde_json::from_slice(&bytes).map_err(|e| {
            StorageError::new(StorageErrorKind::Serialization(format!(
                "{}: {}",
                path.display(),
                e
            )))
            .into()
        })
    }
}
