//! HTTP delivery of [`ExportPayload`]s.

use crate::SyncResponse;
use async_trait::async_trait;
use reqwest::Client;
use rollcall_core::{ExportPayload, PayloadSink};
use rollcall_error::{HttpError, RollcallResult};
use tracing::{debug, info, instrument};

/// Posts export payloads to a spreadsheet web app.
///
/// One POST per run, no retry. Without a URL the dispatcher is disabled
/// and every dispatch reports `false` without touching the network.
/// Delivery failures are logged at debug level only.
#[derive(Debug, Clone)]
pub struct SheetsDispatcher {
    client: Client,
    url: Option<String>,
    log_responses: bool,
}

impl SheetsDispatcher {
    /// Creates a dispatcher for `url`. An empty or blank url disables it.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    /// Creates a dispatcher that reuses an existing HTTP client.
    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        let url = url.into();
        let url = (!url.trim().is_empty()).then(|| url.trim().to_string());
        Self {
            client,
            url,
            log_responses: false,
        }
    }

    /// Log the web app's `logs` array at debug level after each post.
    pub fn with_response_logging(mut self, enabled: bool) -> Self {
        self.log_responses = enabled;
        self
    }

    /// Whether a destination URL is configured.
    pub fn is_enabled(&self) -> bool {
        self.url.is_some()
    }

    /// Endpoint the dispatcher posts to.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Post `payload` once and return the parsed acknowledgement.
    ///
    /// # Errors
    ///
    /// Returns an error if no URL is configured, the request cannot be sent,
    /// or the web app answers with a non-success status.
    #[instrument(skip(self, payload), fields(members = payload.members().len()))]
    pub async fn post(&self, payload: &ExportPayload) -> RollcallResult<SyncResponse> {
        let url = self
            .url
            .as_deref()
            .ok_or_else(|| HttpError::new("spreadsheet_api_url is not set"))?;

        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| HttpError::new(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(HttpError::with_status(status.as_u16(), body).into());
        }

        debug!(status = %status, body_len = body.len(), "Spreadsheet web app responded");
        Ok(SyncResponse::from_body(&body))
    }
}

#[async_trait]
impl PayloadSink for SheetsDispatcher {
    async fn dispatch(&self, payload: &ExportPayload) -> bool {
        if !self.is_enabled() {
            debug!("Spreadsheet export disabled");
            return false;
        }

        match self.post(payload).await {
            Ok(response) => {
                if self.log_responses {
                    for line in response.logs() {
                        debug!(line = %line, "Spreadsheet web app log");
                    }
                }
                if response.is_rejected() {
                    debug!(
                        error = response.error().as_deref().unwrap_or("unknown"),
                        "Spreadsheet web app rejected payload"
                    );
                    return false;
                }
                info!(members = payload.members().len(), "Spreadsheet export sent");
                true
            }
            Err(e) => {
                debug!(error = %e, "Spreadsheet export failed");
                false
            }
        }
    }
}
