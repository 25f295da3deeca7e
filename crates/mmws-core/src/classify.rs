//! Error classifier for completed HTTP exchanges
//!
//! Given the verb, URL, status and body of a response, decide whether the
//! exchange succeeded and, if not, build a [`RequestError`] from the
//! server's error envelope:
//!
//! ```json
//! { "error": { "code": 16544, "message": "Object not found" } }
//! ```
//!
//! Everything here is pure: no I/O, same output for the same input.

use serde::Deserialize;
use url::Url;

use crate::error::RequestError;

/// Server error code for "object not found"
pub const RESOURCE_NOT_FOUND: i64 = 16544;

/// Phrase used when the verb has no entry in [`OPERATION_PHRASES`]
const FALLBACK_PHRASE: &str = "accessing";

/// Verb to operation phrase, used in error messages
const OPERATION_PHRASES: &[(&str, &str)] = &[
    ("GET", "reading"),
    ("POST", "creating"),
    ("PUT", "updating"),
    ("DELETE", "deleting"),
];

/// Error envelope returned by the server on failure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorEnvelope {
    /// Error details
    #[serde(default)]
    pub error: ErrorBody,
}

/// Inner part of [`ErrorEnvelope`]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    /// Numeric server error code
    #[serde(default)]
    pub code: i64,
    /// Server message
    #[serde(default)]
    pub message: String,
}

/// Describe what a request with the given verb was trying to do
pub fn operation_phrase(method: &str) -> &'static str {
    OPERATION_PHRASES
        .iter()
        .find(|(verb, _)| verb.eq_ignore_ascii_case(method))
        .map_or(FALLBACK_PHRASE, |(_, phrase)| phrase)
}

/// Path and query of a request URL
///
/// A URL that cannot be parsed is returned as-is.
pub fn request_resource(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => match parsed.query() {
            Some(query) => format!("{}?{}", parsed.path(), query),
            None => parsed.path().to_string(),
        },
        Err(_) => url.to_string(),
    }
}

/// Classify a completed exchange
///
/// Returns `None` for a 2xx status. Otherwise the body is decoded as an
/// [`ErrorEnvelope`]; a body that is not an envelope yields code `0` and the
/// whole trimmed body as the message.
pub fn classify(method: &str, url: &str, status: u16, body: &str) -> Option<RequestError> {
    if (200..300).contains(&status) {
        return None;
    }

    let envelope = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .filter(|e| e.error.code != 0 || !e.error.message.is_empty());

    let (code, message) = match envelope {
        Some(envelope) => (envelope.error.code, envelope.error.message),
        None => (0, body.trim().to_string()),
    };

    Some(RequestError {
        method: method.to_ascii_uppercase(),
        url: url.to_string(),
        http_status: status,
        code,
        message,
    })
}
