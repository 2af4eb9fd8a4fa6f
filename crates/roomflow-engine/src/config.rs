/*
[INPUT]:  YAML configuration file
[OUTPUT]: Parsed session configuration
[POS]:    Configuration layer - session setup
[UPDATE]: When adding new configuration options
*/

use std::time::Duration;

use roomflow_adapter::ClientConfig;
use serde::{Deserialize, Serialize};

use crate::channel::RetryPolicy;

/// Top-level configuration for one operator session
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Base URL of the hotel operations backend
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// WebSocket endpoint for the notification stream
    #[serde(default = "default_ws_url")]
    pub ws_url: String,
    /// Overall request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// TCP connect timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Notification channel reconnection parameters
    #[serde(default)]
    pub reconnect: ReconnectConfig,
}

/// Notification channel reconnection configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReconnectConfig {
    /// Connection attempts before giving up
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Fixed delay between attempts in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            ws_url: default_ws_url(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            reconnect: ReconnectConfig::default(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://api.roomflow.app".to_string()
}

fn default_ws_url() -> String {
    "wss://api.roomflow.app/ws/notifications".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_max_attempts() -> u32 {
    5
}

fn default_retry_delay_ms() -> u64 {
    2000
}

impl SessionConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.request_timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.reconnect.max_attempts,
            retry_delay: Duration::from_millis(self.reconnect.retry_delay_ms),
        }
    }
}
