//! HTTP error types.

/// HTTP error for export sink delivery, with source location.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("HTTP Error: {} at line {} in {}", message, line, file)]
pub struct HttpError {
    /// The underlying error message
    pub message: String,
    /// Response status, when a response was received
    pub status: Option<u16>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// Create a new HttpError for a transport failure at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use rollcall_error::HttpError;
    ///
    /// let err = HttpError::new("Connection refused");
    /// assert!(err.status.is_none());
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            status: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Create a new HttpError for a non-success response status.
    ///
    /// # Examples
    ///
    /// ```
    /// use rollcall_error::HttpError;
    ///
    /// let err = HttpError::with_status(502, "Bad Gateway");
    /// assert_eq!(err.status, Some(502));
    /// ```
    #[track_caller]
    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            status: Some(status),
            line: location.line(),
            file: location.file(),
        }
    }
}
