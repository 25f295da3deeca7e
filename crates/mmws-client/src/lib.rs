// # Micetro REST Transport
//
// reqwest-backed implementation of `mmws_core::Transport`.
//
// ## Behavior
//
// - Base URL is `<endpoint>/mmws/api`; paths are joined onto it
// - Every API call carries basic authentication; the connectivity probe
//   does not
// - `Content-Type: application/json` on every request
// - TLS certificate verification follows `ConnectionConfig::tls_verify`
// - One timeout per request, no overall deadline
// - Responses with a 5xx status are re-sent after a fixed delay, up to
//   `RetryPolicy::max_retries` times; 4xx responses and transport failures
//   are returned at once
// - Non-2xx responses are turned into `Error::Request` by
//   `mmws_core::classify`
//
// ## Security Requirements
//
// - The password NEVER appears in logs or `Debug` output
// - Disabling TLS verification is an explicit opt-out and is logged

use async_trait::async_trait;
use mmws_core::classify::classify;
use mmws_core::config::ConnectionConfig;
use mmws_core::log_sanitizer::truncate_for_log;
use mmws_core::traits::{DeleteRequest, Filter, QueryParams, Transport, filter_param};
use mmws_core::{Error, Result};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder};
use serde_json::Value;

/// Client for one Micetro server
///
/// Immutable after construction and cheap to clone; share it as
/// `Arc<dyn Transport>` between object families.
#[derive(Clone)]
pub struct MmClient {
    /// Validated connection settings
    /// ⚠️ Holds the password, NEVER log this value
    config: ConnectionConfig,

    /// `<endpoint>/mmws/api`
    base_url: String,

    /// HTTP client with TLS policy, timeout and default headers applied
    client: reqwest::Client,
}

// Custom Debug implementation that hides the password
impl std::fmt::Debug for MmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MmClient")
            .field("base_url", &self.base_url)
            .field("username", &self.config.username)
            .field("password", &"<REDACTED>")
            .field("tls_verify", &self.config.tls_verify)
            .field("timeout_secs", &self.config.timeout_secs)
            .field("retry", &self.config.retry)
            .finish()
    }
}

impl MmClient {
    /// Build a client without contacting the server
    ///
    /// # Returns
    ///
    /// - `Err(Error::Config)` if the configuration is invalid; no request
    ///   is made in that case
    pub fn new(config: ConnectionConfig) -> Result<Self> {
        config.validate()?;

        if !config.tls_verify {
            tracing::warn!(
                "TLS certificate verification is disabled for {}",
                config.endpoint
            );
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .danger_accept_invalid_certs(!config.tls_verify)
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        let base_url = config.base_url();
        tracing::debug!("Micetro client for {}", base_url);

        Ok(Self {
            config,
            base_url,
            client,
        })
    }

    /// Build a client and verify the server is reachable
    ///
    /// # Returns
    ///
    /// - `Err(Error::Config)` if the configuration is invalid
    /// - `Err(Error::Connectivity)` if the probe request could not be
    ///   completed
    pub async fn connect(config: ConnectionConfig) -> Result<Self> {
        let client = Self::new(config)?;
        client
            .probe()
            .await
            .map_err(|e| Error::connectivity(&client.config.endpoint, e.to_string()))?;
        Ok(client)
    }

    /// Send one unauthenticated `GET` to the base URL
    ///
    /// Any HTTP response counts as reachable; only a transport failure is
    /// an error.
    pub async fn probe(&self) -> Result<()> {
        tracing::debug!("Probing {}", self.base_url);

        let response = self
            .client
            .get(&self.base_url)
            .send()
            .await
            .map_err(|e| Error::http(e.to_string()))?;

        tracing::debug!("Probe answered with {}", response.status());
        Ok(())
    }

    /// API base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Connection settings this client was built from
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.url(path))
            .basic_auth(&self.config.username, Some(&self.config.password))
    }

    /// Send a request, re-sending it while the server answers 5xx
    ///
    /// # Returns
    ///
    /// - `Ok(Value)`: the decoded body of a 2xx response (`Null` if empty)
    /// - `Err(Error::Request)`: the classified final non-2xx response
    /// - `Err(Error::Http)`: the request could not be completed
    async fn execute(&self, method: Method, request: RequestBuilder) -> Result<Value> {
        let retry = self.config.retry;
        let mut attempt = 0;

        loop {
            let Some(pending) = request.try_clone() else {
                return Err(Error::http(format!(
                    "{method} request body cannot be re-sent"
                )));
            };

            let response = pending
                .send()
                .await
                .map_err(|e| Error::http(format!("{method} request failed: {e}")))?;

            let status = response.status().as_u16();
            let url = response.url().to_string();
            tracing::debug!("{} {} -> {}", method, url, status);

            if retry.should_retry(status) && attempt < retry.max_retries {
                attempt += 1;
                tracing::warn!(
                    "{} {} returned {} (retry {}/{}), retrying in {:.1}s",
                    method,
                    url,
                    status,
                    attempt,
                    retry.max_retries,
                    retry.delay().as_secs_f32()
                );
                tokio::time::sleep(retry.delay()).await;
                continue;
            }

            let body = response
                .text()
                .await
                .map_err(|e| Error::http(format!("Failed to read response body: {e}")))?;

            if let Some(err) = classify(method.as_str(), &url, status, &body) {
                tracing::debug!(
                    "{} {} failed: code {} {}",
                    method,
                    url,
                    err.code,
                    truncate_for_log(&err.message)
                );
                return Err(err.into());
            }

            if body.trim().is_empty() {
                return Ok(Value::Null);
            }
            return Ok(serde_json::from_str(&body)?);
        }
    }
}

#[async_trait]
impl Transport for MmClient {
    async fn get(&self, path: &str, query: &QueryParams, filter: &Filter) -> Result<Value> {
        let mut request = self.request(Method::GET, path);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(filter) = filter_param(filter) {
            request = request.query(&[("filter", filter)]);
        }
        self.execute(Method::GET, request).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        let request = self.request(Method::POST, path).json(body);
        self.execute(Method::POST, request).await
    }

    async fn put(&self, path: &str, body: &Value) -> Result<()> {
        let request = self.request(Method::PUT, path).json(body);
        self.execute(Method::PUT, request).await?;
        Ok(())
    }

    async fn delete(&self, path: &str, obj_type: Option<&str>) -> Result<()> {
        let request = self
            .request(Method::DELETE, path)
            .json(&DeleteRequest::new(obj_type));
        self.execute(Method::DELETE, request).await?;
        Ok(())
    }
}
