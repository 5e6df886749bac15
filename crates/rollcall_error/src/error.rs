//! Top-level error wrapper types.

use crate::{ConfigError, HttpError, JsonError, PlatformError};

/// Every error condition a rollcall crate can surface.
///
/// # Examples
///
/// ```
/// use rollcall_error::{RollcallError, HttpError};
///
/// let err: RollcallError = HttpError::new("Connection failed").into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum RollcallErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Chat platform error
    #[from(PlatformError)]
    Platform(PlatformError),
}

/// Rollcall error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Rollcall Error: {}", _0)]
pub struct RollcallError(Box<RollcallErrorKind>);

impl RollcallError {
    /// Create a new error from a kind.
    pub fn new(kind: RollcallErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &RollcallErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to RollcallErrorKind
impl<T> From<T> for RollcallError
where
    T: Into<RollcallErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for rollcall operations.
pub type RollcallResult<T> = std::result::Result<T, RollcallError>;
