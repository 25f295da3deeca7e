//! Test doubles and common utilities for object operation contract tests
//!
//! `MockTransport` replays canned responses in order and records every call
//! so tests can assert on paths, filters and bodies.

#![allow(dead_code)]

use mmws_core::classify::RESOURCE_NOT_FOUND;
use mmws_core::error::{Error, RequestError, Result};
use mmws_core::traits::{Filter, QueryParams, Transport};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// One call made through the transport
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    pub query: QueryParams,
    pub filter: Filter,
    pub body: Option<Value>,
    pub obj_type: Option<String>,
}

/// A transport that replays queued responses
#[derive(Default)]
pub struct MockTransport {
    /// Responses handed out in order; an empty queue answers `Value::Null`
    responses: Mutex<VecDeque<Result<Value>>>,
    /// Calls made so far
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a successful response body
    pub fn respond(&self, body: Value) {
        self.responses.lock().unwrap().push_back(Ok(body));
    }

    /// Queue a failure
    pub fn fail(&self, error: Error) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Queue the server's "object not found" failure
    pub fn not_found(&self) {
        self.fail(request_error(404, RESOURCE_NOT_FOUND, "Object not found"));
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Get the number of calls made
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Get the only recorded call
    pub fn single_call(&self) -> RecordedCall {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one call, got {calls:?}");
        calls[0].clone()
    }

    fn record(&self, call: RecordedCall) -> Result<Value> {
        self.calls.lock().unwrap().push(call);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(Value::Null))
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn get(&self, path: &str, query: &QueryParams, filter: &Filter) -> Result<Value> {
        self.record(RecordedCall {
            method: "GET",
            path: path.to_string(),
            query: query.clone(),
            filter: filter.clone(),
            body: None,
            obj_type: None,
        })
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        self.record(RecordedCall {
            method: "POST",
            path: path.to_string(),
            query: QueryParams::new(),
            filter: Filter::new(),
            body: Some(body.clone()),
            obj_type: None,
        })
    }

    async fn put(&self, path: &str, body: &Value) -> Result<()> {
        self.record(RecordedCall {
            method: "PUT",
            path: path.to_string(),
            query: QueryParams::new(),
            filter: Filter::new(),
            body: Some(body.clone()),
            obj_type: None,
        })
        .map(|_| ())
    }

    async fn delete(&self, path: &str, obj_type: Option<&str>) -> Result<()> {
        self.record(RecordedCall {
            method: "DELETE",
            path: path.to_string(),
            query: QueryParams::new(),
            filter: Filter::new(),
            body: None,
            obj_type: obj_type.map(str::to_string),
        })
        .map(|_| ())
    }
}

/// Build a server-reported failure
pub fn request_error(http_status: u16, code: i64, message: &str) -> Error {
    Error::Request(RequestError {
        method: "GET".to_string(),
        url: "https://mm.example.com/mmws/api/test".to_string(),
        http_status,
        code,
        message: message.to_string(),
    })
}

/// Build a filter from key/value pairs
pub fn filter(pairs: &[(&str, &str)]) -> Filter {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
