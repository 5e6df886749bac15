use derive_getters::Getters;
use rollcall_error::{JsonError, RollcallResult};
use serde::Deserialize;
use tracing::debug;

/// Optional acknowledgement body returned by the spreadsheet web app.
///
/// Every field is optional; a plain 2xx with any body counts as success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Getters)]
pub struct SyncResponse {
    #[serde(default)]
    ok: Option<bool>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    logs: Vec<String>,
}

impl SyncResponse {
    /// Parse a JSON acknowledgement.
    ///
    /// # Errors
    ///
    /// Returns a [`JsonError`] if the body is not a JSON object of this shape.
    pub fn parse(body: &str) -> RollcallResult<Self> {
        Ok(serde_json::from_str(body).map_err(JsonError::from)?)
    }

    /// Parse a response body, treating anything that is not an
    /// acknowledgement object as an empty one.
    pub fn from_body(body: &str) -> Self {
        Self::parse(body).unwrap_or_else(|e| {
            debug!(error = %e, "Response body is not an acknowledgement");
            Self::default()
        })
    }

    /// Whether the web app explicitly reported failure.
    pub fn is_rejected(&self) -> bool {
        self.ok == Some(false)
    }
}
