//! Discord-specific error types.

use derive_getters::Getters;

/// Discord error variants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum DiscordErrorKind {
    /// Connection to Discord gateway failed.
    #[display("Connection failed: {_0}")]
    ConnectionFailed(String),

    /// Interaction (slash command) failed.
    #[display("Interaction failed: {_0}")]
    InteractionFailed(String),

    /// An announcement schedule could not be parsed.
    #[display("Invalid schedule: {_0}")]
    InvalidSchedule(String),
}

/// Discord error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Discord Error: {} at line {} in {}", kind, line, file)]
pub struct DiscordError {
    kind: DiscordErrorKind,
    line: u32,
    #[getter(skip)]
    file: &'static str,
}

impl DiscordError {
    /// Create a new DiscordError with automatic location tracking.
    ///
    /// # Example
    /// ```
    /// use rollcall_social::{DiscordError, DiscordErrorKind};
    ///
    /// let err = DiscordError::new(DiscordErrorKind::InvalidSchedule("* *".into()));
    /// assert!(err.to_string().contains("* *"));
    /// ```
    #[track_caller]
    pub fn new(kind: DiscordErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get field `file` from instance of `DiscordError`.
    pub fn file(&self) -> &'static str {
        self.file
    }
}

/// Result type for Discord operations.
pub type DiscordResult<T> = Result<T, DiscordError>;
