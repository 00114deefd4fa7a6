//! Top-level error wrapper types.

use crate::{AstronomyError, ConfigError, HttpError, JsonError, SocialError, StorageError};
#[cfg(feature = "database")]
use crate::DatabaseError;

/// Every failure a moonx run can surface.
///
/// # Examples
///
/// ```
/// use moonx_error::{MoonxError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: MoonxError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum MoonxErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Audit file storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Astronomy provider error
    #[from(AstronomyError)]
    Astronomy(AstronomyError),
    /// Posting service error
    #[from(SocialError)]
    Social(SocialError),
    /// Database error
    #[cfg(feature = "database")]
    #[from(DatabaseError)]
    Database(DatabaseError),
}

/// moonx error with kind discrimination.
///
/// # Examples
///
/// ```
/// use moonx_error::{MoonxResult, ConfigError};
///
/// fn might_fail() -> MoonxResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("moonx Error: {}", _0)]
pub struct MoonxError(Box<MoonxErrorKind>);

impl MoonxError {
    /// Create a new error from a kind.
    pub fn new(kind: MoonxErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &MoonxErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to MoonxErrorKind
impl<T> From<T> for MoonxError
where
    T: Into<MoonxErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for moonx operations.
pub type MoonxResult<T> = std::result::Result<T, MoonxError>;
