//! Client configuration
//!
//! Where the API lives and which cross-cutting behaviors are switched on.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use userdesk_common::error::parse_flag;

// ============================================================================
// Client Configuration Constants
// ============================================================================

/// Server URL used when `USERDESK_SERVER_URL` is not set.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// Path prefix every API route lives under.
pub const DEFAULT_API_PREFIX: &str = "/api";

/// Configuration for [`ApiClient`](crate::api::ApiClient)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Scheme, host and port of the backend
    pub server_url: String,

    /// Fixed path prefix in front of every resource path
    pub api_prefix: String,

    /// Request timeout; `None` waits indefinitely
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Rewrite empty strings to `null` before sending
    pub normalize_empty_strings: bool,

    /// Log every response and failure
    pub log_responses: bool,

    /// Extra headers sent with every request
    #[serde(default)]
    pub default_headers: BTreeMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            timeout_secs: None,
            normalize_empty_strings: true,
            log_responses: true,
            default_headers: BTreeMap::new(),
        }
    }
}

impl ClientConfig {
    /// Config pointing at `server_url` with every other setting at its default
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            ..Self::default()
        }
    }

    /// Load config from environment variables
    ///
    /// - `USERDESK_SERVER_URL`
    /// - `USERDESK_API_PREFIX`
    /// - `USERDESK_API_TIMEOUT_SECS`
    /// - `USERDESK_NORMALIZE_EMPTY`
    /// - `USERDESK_LOG_RESPONSES`
    pub fn from_env() -> Result<Self> {
        Self::default().merge_env()
    }

    /// Overlay environment variables on top of this config
    pub fn merge_env(mut self) -> Result<Self> {
        if let Ok(url) = std::env::var("USERDESK_SERVER_URL") {
            self.server_url = url;
        }

        if let Ok(prefix) = std::env::var("USERDESK_API_PREFIX") {
            self.api_prefix = prefix;
        }

        if let Ok(secs) = std::env::var("USERDESK_API_TIMEOUT_SECS") {
            let secs = secs.trim().parse::<u64>().map_err(|_| {
                CliError::config(format!(
                    "USERDESK_API_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    secs
                ))
            })?;
            if secs == 0 {
                return Err(CliError::config(
                    "USERDESK_API_TIMEOUT_SECS must be at least 1; unset it to wait indefinitely",
                ));
            }
            self.timeout_secs = Some(secs);
        }

        if let Ok(flag) = std::env::var("USERDESK_NORMALIZE_EMPTY") {
            self.normalize_empty_strings = parse_flag("USERDESK_NORMALIZE_EMPTY", &flag)?;
        }

        if let Ok(flag) = std::env::var("USERDESK_LOG_RESPONSES") {
            self.log_responses = parse_flag("USERDESK_LOG_RESPONSES", &flag)?;
        }

        Ok(self)
    }

    /// Request timeout, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn set_server_url(&mut self, url: impl Into<String>) {
        self.server_url = url.into();
    }

    pub fn set_api_prefix(&mut self, prefix: impl Into<String>) {
        self.api_prefix = prefix.into();
    }

    pub fn set_normalize_empty_strings(&mut self, enabled: bool) {
        self.normalize_empty_strings = enabled;
    }

    pub fn set_log_responses(&mut self, enabled: bool) {
        self.log_responses = enabled;
    }

    /// Add a header sent with every request
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
        assert_eq!(config.api_prefix, "/api");
        assert!(config.timeout().is_none());
        assert!(config.normalize_empty_strings);
        assert!(config.log_responses);
        assert!(config.default_headers.is_empty());
    }

    #[test]
    fn test_config_from_env() {
        std::env::set_var("USERDESK_SERVER_URL", "http://example.com");
        std::env::set_var("USERDESK_API_TIMEOUT_SECS", "30");
        std::env::set_var("USERDESK_NORMALIZE_EMPTY", "off");

        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.server_url, "http://example.com");
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
        assert!(!config.normalize_empty_strings);

        std::env::set_var("USERDESK_API_TIMEOUT_SECS", "soon");
        assert!(ClientConfig::from_env().is_err());

        std::env::set_var("USERDESK_API_TIMEOUT_SECS", "0");
        let err = ClientConfig::from_env().unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().contains("at least 1"));

        std::env::remove_var("USERDESK_SERVER_URL");
        std::env::remove_var("USERDESK_API_TIMEOUT_SECS");
        std::env::remove_var("USERDESK_NORMALIZE_EMPTY");
    }

    #[test]
    fn test_config_setters() {
        let mut config = ClientConfig::new("https://users.example.com")
            .with_header("X-Request-Source", "userdesk");

        config.set_api_prefix("/v2");
        config.set_log_responses(false);
        config.set_normalize_empty_strings(false);

        assert_eq!(config.server_url, "https://users.example.com");
        assert_eq!(config.api_prefix, "/v2");
        assert!(!config.log_responses);
        assert!(!config.normalize_empty_strings);
        assert_eq!(
            config.default_headers.get("X-Request-Source").map(String::as_str),
            Some("userdesk")
        );
    }
}
