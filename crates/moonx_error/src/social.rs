//! Posting service error types.

/// Posting service error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum SocialErrorKind {
    /// Credentials rejected (401/403)
    #[display("Authentication failed: {}", _0)]
    Authentication(String),
    /// Service refused the request for exceeding its limits (429)
    #[display("Rate limited by posting service: {}", _0)]
    RateLimited(String),
    /// Any other non-success status
    #[display("Posting service rejected request with HTTP {}: {}", status, message)]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },
    /// Transport failure before a response arrived
    #[display("Posting request failed: {}", _0)]
    Request(String),
    /// Response body could not be understood
    #[display("Failed to parse posting response: {}", _0)]
    Parse(String),
    /// Could not build the OAuth signature
    #[display("Failed to sign request: {}", _0)]
    Signing(String),
}

impl SocialErrorKind {
    /// Classify a non-success HTTP status from the posting service.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => Self::Authentication(message),
            429 => Self::RateLimited(message),
            _ => Self::Rejected { status, message },
        }
    }
}

/// Posting service error with source location tracking.
///
/// # Examples
///
/// ```
/// use moonx_error::{SocialError, SocialErrorKind};
///
/// let err = SocialError::new(SocialErrorKind::from_status(401, "Unauthorized"));
/// assert!(matches!(err.kind, SocialErrorKind::Authentication(_)));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Social Error: {} at line {} in {}", kind, line, file)]
pub struct SocialError {
    /// The kind of error that occurred
    pub kind: SocialErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl SocialError {
    /// Create a new SocialError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SocialErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
