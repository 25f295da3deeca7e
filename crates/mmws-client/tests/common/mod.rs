//! Shared helpers for transport contract tests

#![allow(dead_code)]

use mmws_client::MmClient;
use mmws_core::config::{ConnectionConfig, RetryPolicy};
use std::net::TcpListener;
use wiremock::MockServer;

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "s3cret";

/// `Basic` credentials for `USERNAME:PASSWORD`
pub const BASIC_AUTH: &str = "Basic YWRtaW46czNjcmV0";

/// Configuration pointing at a mock server, retrying without delay
pub fn config_for(server: &MockServer, max_retries: u32) -> ConnectionConfig {
    ConnectionConfig::new(server.uri(), USERNAME, PASSWORD).with_retry(RetryPolicy {
        max_retries,
        retry_delay_ms: 0,
    })
}

/// Client for a mock server, built without the connectivity probe
pub fn client_for(server: &MockServer, max_retries: u32) -> MmClient {
    MmClient::new(config_for(server, max_retries)).expect("valid config")
}

/// An endpoint nothing listens on
pub fn refused_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
