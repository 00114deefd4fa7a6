//! Astronomy provider error types.

/// Astronomy provider error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum AstronomyErrorKind {
    /// Request never produced a response
    #[display("Astronomy request failed: {}", _0)]
    Request(String),
    /// Provider answered with a non-success status
    #[display("Astronomy API returned HTTP {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },
    /// Body was not a JSON document
    #[display("Failed to parse astronomy response: {}", _0)]
    Parse(String),
    /// Phase code outside the eight known values
    #[display("Moon phase not recognized: '{}'", _0)]
    UnknownPhase(String),
}

/// Astronomy error with source location tracking.
///
/// # Examples
///
/// ```
/// use moonx_error::{AstronomyError, AstronomyErrorKind};
///
/// let err = AstronomyError::new(AstronomyErrorKind::UnknownPhase("BLUE_MOON".into()));
/// assert!(format!("{}", err).contains("BLUE_MOON"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Astronomy Error: {} at line {} in {}", kind, line, file)]
pub struct AstronomyError {
    /// The kind of error that occurred
    pub kind: AstronomyErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl AstronomyError {
    /// Create a new AstronomyError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AstronomyErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
