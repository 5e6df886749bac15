//! Host platform error types.
//!
//! Raised by whatever chat platform adapter backs the aggregation pipeline
//! when a fetch or send crosses the platform boundary and fails.

/// Platform error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PlatformErrorKind {
    /// Fetching a message, reactor list, member list or channel failed.
    #[display("Fetch failed ({}): {}", resource, reason)]
    FetchFailed {
        /// What was being fetched (e.g. "message", "members").
        resource: String,
        /// Underlying reason.
        reason: String,
    },

    /// Sending a chat message failed.
    #[display("Send failed: {}", _0)]
    SendFailed(String),

    /// The referenced resource does not exist or is not visible to the bot.
    #[display("Not found: {}", _0)]
    NotFound(String),
}

impl PlatformErrorKind {
    /// Shorthand for a [`PlatformErrorKind::FetchFailed`].
    pub fn fetch(resource: impl Into<String>, reason: impl ToString) -> Self {
        Self::FetchFailed {
            resource: resource.into(),
            reason: reason.to_string(),
        }
    }
}

/// Platform error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Platform Error: {} at line {} in {}", kind, line, file)]
pub struct PlatformError {
    /// Error kind.
    pub kind: PlatformErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl PlatformError {
    /// Create a new PlatformError with automatic location tracking.
    ///
    /// # Examples
    ///
    /// ```
    /// use rollcall_error::{PlatformError, PlatformErrorKind};
    ///
    /// let err = PlatformError::new(PlatformErrorKind::SendFailed("missing access".into()));
    /// assert!(format!("{}", err).contains("missing access"));
    /// ```
    #[track_caller]
    pub fn new(kind: PlatformErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for host platform calls.
pub type PlatformResult<T> = Result<T, PlatformError>;
