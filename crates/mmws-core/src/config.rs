//! Connection configuration
//!
//! A [`ConnectionConfig`] describes how to reach one Micetro server. It is
//! validated in full before any client is built; a config that fails
//! [`ConnectionConfig::validate`] never produces a usable client.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::error::{Error, Result};

/// API path appended to the configured endpoint
pub const API_PATH: &str = "/mmws/api";

/// Audit tag used in save comments sent with writes
pub const SAVE_COMMENT_TAG: &str = "mmctl";

/// Connection settings for a Micetro server
#[derive(Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Endpoint URL, e.g. `https://micetro.example.com`
    pub endpoint: String,

    /// Username for basic authentication
    pub username: String,

    /// Password for basic authentication
    /// ⚠️ NEVER log this value
    pub password: String,

    /// Verify the server's TLS certificate
    ///
    /// Disabling verification is an explicit opt-out.
    #[serde(default = "default_tls_verify")]
    pub tls_verify: bool,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retry policy for 5xx responses
    #[serde(default)]
    pub retry: RetryPolicy,
}

// Custom Debug implementation that hides the password
impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("password", &"<REDACTED>")
            .field("tls_verify", &self.tls_verify)
            .field("timeout_secs", &self.timeout_secs)
            .field("retry", &self.retry)
            .finish()
    }
}

impl ConnectionConfig {
    /// Create a configuration with default TLS, timeout and retry settings
    pub fn new(
        endpoint: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            username: username.into(),
            password: password.into(),
            tls_verify: default_tls_verify(),
            timeout_secs: default_timeout_secs(),
            retry: RetryPolicy::default(),
        }
    }

    /// Enable or disable TLS certificate verification
    pub fn with_tls_verify(mut self, tls_verify: bool) -> Self {
        self.tls_verify = tls_verify;
        self
    }

    /// Set the per-request timeout in seconds
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Replace the retry policy
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Validate the configuration
    ///
    /// Checks run in a fixed order and stop at the first violation.
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.is_empty() {
            return Err(Error::config("REST API endpoint must be configured"));
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(Error::config(format!(
                "REST API endpoint: {} must start with \"http://\" or \"https://\"",
                self.endpoint
            )));
        }

        match Url::parse(&self.endpoint) {
            Ok(url) if url.has_host() => {}
            _ => {
                return Err(Error::config(format!(
                    "REST API endpoint: {} is not a valid absolute URL",
                    self.endpoint
                )));
            }
        }

        if self.username.is_empty() {
            return Err(Error::config("Invalid username"));
        }

        if self.password.is_empty() {
            return Err(Error::config("Invalid password"));
        }

        Ok(())
    }

    /// Base URL of the API: the endpoint with [`API_PATH`] appended
    pub fn base_url(&self) -> String {
        format!("{}{}", self.endpoint.trim_end_matches('/'), API_PATH)
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Fixed-delay retry policy for transient (5xx) responses
///
/// Network-level failures and 4xx responses are never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay between attempts in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl RetryPolicy {
    /// A policy that never retries
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            retry_delay_ms: 0,
        }
    }

    /// Delay between attempts
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Whether a response with this status should be retried
    pub fn should_retry(&self, status: u16) -> bool {
        (500..600).contains(&status)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

fn default_tls_verify() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    5
}

fn default_retry_delay_ms() -> u64 {
    1000
}
