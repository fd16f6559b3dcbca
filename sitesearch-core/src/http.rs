//! Shared HTTP client for search backend requests.

use crate::config::WidgetConfig;
use crate::error::WidgetError;
use std::time::Duration;

/// Build a [`reqwest::Client`] configured for the search backend.
///
/// The client has:
/// - Timeout from config
/// - The configured User-Agent
/// - gzip decompression
///
/// # Errors
///
/// Returns [`WidgetError::Http`] if the client cannot be constructed.
pub fn build_client(config: &WidgetConfig) -> Result<reqwest::Client, WidgetError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .map_err(|e| WidgetError::Http(format!("failed to build HTTP client: {e}")))
}

/// Send a request and decode the JSON body of a successful response.
///
/// Returns `Ok(None)` for a non-success status so callers can decide
/// whether that means "no data" or an error.
///
/// # Errors
///
/// Returns [`WidgetError::Http`] on transport failure and
/// [`WidgetError::Parse`] when a successful response is not valid JSON.
pub(crate) async fn send_json(
    request: reqwest::RequestBuilder,
    label: &str,
) -> Result<Option<serde_json::Value>, WidgetError> {
    let response = request
        .send()
        .await
        .map_err(|e| WidgetError::Http(format!("{label} request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        tracing::debug!(label, %status, "non-success response");
        return Ok(None);
    }

    let body = response
        .text()
        .await
        .map_err(|e| WidgetError::Http(format!("{label} response read failed: {e}")))?;

    tracing::trace!(label, bytes = body.len(), "response received");

    serde_json::from_str(&body)
        .map(Some)
        .map_err(|e| WidgetError::Parse(format!("{label} response is not JSON: {e}")))
}
