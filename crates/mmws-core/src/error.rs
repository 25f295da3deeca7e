//! Error types for the Micetro integration layer
//!
//! This module defines all error types used throughout the workspace.
//! [`RequestError`] is the structured form of a failed HTTP exchange and is
//! produced by the classifier in [`crate::classify`].

use thiserror::Error;

use crate::classify::{RESOURCE_NOT_FOUND, operation_phrase, request_resource};

/// Result type alias for Micetro operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the Micetro integration layer
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid or missing connection configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The connectivity probe made while building a client failed
    #[error("Could not connect with endpoint: {endpoint}\n\t{detail}")]
    Connectivity {
        /// Endpoint as configured
        endpoint: String,
        /// Underlying cause
        detail: String,
    },

    /// The server completed the exchange and reported a failure
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Malformed composite reference
    #[error("Invalid reference: {0}")]
    Format(String),

    /// A lookup that expects exactly one object found none
    #[error("no {kind} found matching your criteria")]
    NoMatch {
        /// Object family, e.g. "DNS zones"
        kind: String,
    },

    /// A lookup that expects exactly one object found several
    #[error("{count} {kind} found matching your criteria, but should be only 1")]
    AmbiguousMatch {
        /// Object family, e.g. "DNS zones"
        kind: String,
        /// Number of matches returned by the server
        count: usize,
    },

    /// The server accepted the request but refused to create the object
    #[error("Server rejected the object: {0}")]
    Rejected(String),

    /// Transport-level failure (connection refused, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a connectivity error
    pub fn connectivity(endpoint: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Connectivity {
            endpoint: endpoint.into(),
            detail: detail.into(),
        }
    }

    /// Create a reference format error
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Create a "rejected" error
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    /// Create an HTTP transport error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create a "no match" error
    pub fn no_match(kind: impl Into<String>) -> Self {
        Self::NoMatch { kind: kind.into() }
    }

    /// Create an "ambiguous match" error
    pub fn ambiguous_match(kind: impl Into<String>, count: usize) -> Self {
        Self::AmbiguousMatch {
            kind: kind.into(),
            count,
        }
    }

    /// The structured server error, if this is one
    pub fn as_request(&self) -> Option<&RequestError> {
        match self {
            Self::Request(e) => Some(e),
            _ => None,
        }
    }

    /// Whether the server reported the object as not found
    pub fn is_not_found(&self) -> bool {
        self.as_request().is_some_and(RequestError::is_not_found)
    }
}

/// A completed HTTP exchange that the server marked as failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestError {
    /// HTTP verb of the failed request
    pub method: String,
    /// Full request URL
    pub url: String,
    /// HTTP status code
    pub http_status: u16,
    /// Server-reported error code (0 if the body carried none)
    pub code: i64,
    /// Server-reported message
    pub message: String,
}

impl RequestError {
    /// Whether the server code is the well-known "object not found" code
    pub fn is_not_found(&self) -> bool {
        self.code == RESOURCE_NOT_FOUND
    }

    /// Whether the HTTP status belongs to the 5xx class
    pub fn is_transient(&self) -> bool {
        (500..600).contains(&self.http_status)
    }
}

impl std::fmt::Display for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Failed with {} {}\n\tHTTP code:{}: {}",
            operation_phrase(&self.method),
            request_resource(&self.url),
            self.http_status,
            self.message
        )
    }
}

impl std::error::Error for RequestError {}
