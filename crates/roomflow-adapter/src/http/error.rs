/*
[INPUT]:  Error sources (HTTP, API, serialization, WebSocket)
[OUTPUT]: Structured error types with user-facing rendering
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the roomflow adapter
#[derive(Error, Debug)]
pub enum AdapterError {
    /// HTTP request failed before a response was produced
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-2xx response
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// WebSocket error
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AdapterError {
    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        AdapterError::Api {
            status: status.as_u16(),
            message: message.into(),
        }
    }

    /// Check if the error is a transport-level failure (as opposed to a
    /// rejected request the server actually saw)
    pub fn is_transport(&self) -> bool {
        matches!(self, AdapterError::Http(_) | AdapterError::WebSocket(_))
    }

    /// Human-readable text suitable for a user-visible notice.
    ///
    /// API errors carry the backend's `detail`/`message` text verbatim;
    /// everything else collapses to a generic retry hint so transport
    /// internals never leak into the UI.
    pub fn user_message(&self) -> String {
        match self {
            AdapterError::Api { message, .. } => message.clone(),
            AdapterError::Http(_) | AdapterError::WebSocket(_) => {
                "Network error, please try again".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Result type alias for roomflow adapter operations
pub type Result<T> = std::result::Result<T, AdapterError>;
