//! Settings errors.

use std::fmt;

/// A bad or missing bot setting.
///
/// `key` names the offending setting (`discord_token`, `utc_offset_hours`, ...)
/// when one is to blame; source-level failures such as an unreadable file
/// carry none.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error)]
pub struct ConfigError {
    /// What went wrong
    pub message: String,
    /// Setting key at fault, if any
    pub key: Option<String>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// A settings error not tied to one key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rollcall_error::ConfigError;
    ///
    /// let err = ConfigError::new("rollcall.toml: expected a table");
    /// assert!(err.key.is_none());
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self::located(None, message.into())
    }

    /// A settings error blamed on `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rollcall_error::ConfigError;
    ///
    /// let err = ConfigError::for_key("discord_token", "is not set");
    /// assert_eq!(err.key.as_deref(), Some("discord_token"));
    /// assert!(err.to_string().starts_with("Configuration Error: discord_token is not set"));
    /// ```
    #[track_caller]
    pub fn for_key(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::located(Some(key.into()), message.into())
    }

    #[track_caller]
    fn located(key: Option<String>, message: String) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message,
            key,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Configuration Error: ")?;
        if let Some(key) = &self.key {
            write!(f, "{key} ")?;
        }
        write!(f, "{} at line {} in {}", self.message, self.line, self.file)
    }
}
