/*
[INPUT]:  HTTP configuration (base URL, timeouts, credentials)
[OUTPUT]: Configured reqwest client ready for API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use crate::http::{AdapterError, Result};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Default base URL for the hotel operations backend
const DEFAULT_BASE_URL: &str = "https://api.roomflow.app";

/// Message used when a failure payload carries no usable text
const GENERIC_FAILURE_MESSAGE: &str = "Request failed";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Credentials for authenticated requests
#[derive(Debug, Clone)]
pub struct Credentials {
    pub token: String,
    pub user_id: i64,
}

/// Main HTTP client for the roomflow backend
#[derive(Debug)]
pub struct RoomflowClient {
    http_client: Client,
    base_url: Url,
    credentials: Option<Credentials>,
}

impl RoomflowClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_config_and_base_url(config, DEFAULT_BASE_URL)
    }

    /// Create a new client against an explicit base URL.
    ///
    /// This is the constructor tests use to point the client at a mock server.
    pub fn with_config_and_base_url(config: ClientConfig, base_url: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: Url::parse(base_url)?,
            credentials: None,
        })
    }

    /// Set credentials for authenticated requests
    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = Some(credentials);
    }

    /// Get credentials if set
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Build full URL for an endpoint
    fn url(&self, endpoint: &str) -> std::result::Result<Url, url::ParseError> {
        self.base_url.join(endpoint)
    }

    /// Build a request builder for an endpoint
    pub(crate) fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.url(endpoint)?;
        Ok(self.http_client.request(method, url))
    }

    /// Build a request builder with the bearer token attached
    pub(crate) fn request_with_auth(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let builder = self.request(method, endpoint)?;
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            AdapterError::Config("credentials not set on RoomflowClient".to_string())
        })?;
        Ok(builder.bearer_auth(&credentials.token))
    }

    /// Send a request and decode a JSON body, mapping failures to `Api` errors.
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), bytes = body.len(), "api request failed");
        Err(AdapterError::api_error(status, failure_message(&body)))
    }

    /// Send a request whose successful response body is ignored.
    pub(crate) async fn send_ok(&self, builder: RequestBuilder) -> Result<()> {
        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), bytes = body.len(), "api request failed");
        Err(AdapterError::api_error(status, failure_message(&body)))
    }
}

/// Extract human-readable text from a failure payload.
///
/// The backend uses `detail` for request-level rejections and `message` for
/// service errors; malformed or empty bodies fall back to a generic message.
fn failure_message(body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let text = parsed
        .as_ref()
        .and_then(|value| value.get("detail").or_else(|| value.get("message")))
        .and_then(|field| field.as_str());

    match text {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => GENERIC_FAILURE_MESSAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_message_prefers_detail() {
        let body = r#"{"detail": "Task is not assigned to you", "message": "other"}"#;
        assert_eq!(failure_message(body), "Task is not assigned to you");
    }

    #[test]
    fn failure_message_falls_back_to_message_field() {
        let body = r#"{"message": "Service unavailable"}"#;
        assert_eq!(failure_message(body), "Service unavailable");
    }

    #[test]
    fn failure_message_generic_on_malformed_body() {
        assert_eq!(failure_message("<html>502</html>"), GENERIC_FAILURE_MESSAGE);
        assert_eq!(failure_message(""), GENERIC_FAILURE_MESSAGE);
        assert_eq!(failure_message(r#"{"detail": ""}"#), GENERIC_FAILURE_MESSAGE);
    }
}
