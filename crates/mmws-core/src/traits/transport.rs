// # Transport Trait
//
// Defines the interface object operations use to reach the server.
//
// ## Implementations
//
// - reqwest: `mmws-client` crate (`MmClient`)
// - Tests: recording mocks under `tests/common`
//
// ## Usage
//
// ```rust,ignore
// use mmws_core::traits::{Filter, QueryParams, Transport};
//
// async fn zones(transport: &dyn Transport) -> mmws_core::Result<serde_json::Value> {
//     let mut filter = Filter::new();
//     filter.insert("name".into(), "example.com.".into());
//     transport.get("DNSZones", &QueryParams::new(), &filter).await
// }
// ```

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::config::SAVE_COMMENT_TAG;
use crate::error::Result;

/// Query parameters, each sent as its own `key=value` pair
pub type QueryParams = BTreeMap<String, String>;

/// Server-side filter, sent as one `filter` query parameter
pub type Filter = BTreeMap<String, String>;

/// Join filter entries into the value of the `filter` query parameter
///
/// Entries become `key=value` pairs joined with `&`; an empty filter yields
/// `None` so the parameter is omitted.
///
/// ```
/// use mmws_core::traits::{Filter, filter_param};
///
/// let mut filter = Filter::new();
/// filter.insert("name".into(), "example.com.".into());
/// filter.insert("authority".into(), "dns1.".into());
/// assert_eq!(
///     filter_param(&filter).as_deref(),
///     Some("authority=dns1.&name=example.com.")
/// );
/// ```
pub fn filter_param(filter: &Filter) -> Option<String> {
    if filter.is_empty() {
        return None;
    }
    Some(
        filter
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&"),
    )
}

/// Body of every delete request
///
/// Deletes always force removal and leave an audit comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRequest {
    /// Audit comment stored by the server
    pub save_comment: String,
    /// Bypass server-side "in use" protection
    pub force_removal: bool,
    /// Object type hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obj_type: Option<String>,
}

impl DeleteRequest {
    /// Delete request with an optional object type hint
    pub fn new(obj_type: Option<&str>) -> Self {
        Self {
            save_comment: format!("deleted by {SAVE_COMMENT_TAG}"),
            force_removal: true,
            obj_type: obj_type.map(str::to_string),
        }
    }
}

/// Authenticated access to the `/mmws/api` endpoint
///
/// Paths are relative to the API base (`DNSZones`, `DNSRecords/42`, ...).
/// A non-2xx response comes back as [`crate::Error::Request`]; transport
/// failures as [`crate::Error::Http`].
///
/// # Thread Safety
///
/// Implementations are shared between callers and must not mutate any
/// state after construction.
#[async_trait]
pub trait Transport: Send + Sync {
    /// `GET path` with query parameters and a server-side filter
    ///
    /// An empty success body comes back as `Value::Null`.
    async fn get(&self, path: &str, query: &QueryParams, filter: &Filter) -> Result<Value>;

    /// `POST path` with a JSON body, returning the response body
    async fn post(&self, path: &str, body: &Value) -> Result<Value>;

    /// `PUT path` with a JSON body
    async fn put(&self, path: &str, body: &Value) -> Result<()>;

    /// `DELETE path` with a [`DeleteRequest`] body
    async fn delete(&self, path: &str, obj_type: Option<&str>) -> Result<()>;
}
