//! In-memory transport for testing
//!
//! `MockTransport` answers every request through a caller-supplied responder and
//! records the call, so tests can assert on the exact sequence of endpoints an
//! operation hits without a running note service.
//!
//! # Usage
//!
//! ```ignore
//! use joplin_mcp::client::mock::MockTransport;
//! use serde_json::json;
//!
//! let transport = MockTransport::new(|call| {
//!     if call.path() == "folders" {
//!         Ok(Some(MockTransport::page(vec![json!({"id": "f1"})], false)))
//!     } else {
//!         Ok(None)
//!     }
//! });
//! ```

use super::transport::Transport;
use crate::error::Result;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A request observed by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// HTTP method
    pub method: Method,
    /// Endpoint including its query string
    pub endpoint: String,
    /// JSON body, or the `props` part of a multipart upload
    pub body: Option<Value>,
    /// Local file involved in an upload or download
    pub file: Option<PathBuf>,
}

impl RecordedCall {
    /// Endpoint without its query string
    pub fn path(&self) -> &str {
        self.endpoint.split('?').next().unwrap_or_default()
    }

    /// Decoded value of a query parameter
    pub fn query(&self, key: &str) -> Option<String> {
        let (_, query) = self.endpoint.split_once('?')?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    /// Whether this call used `method` against `path`
    pub fn is(&self, method: &Method, path: &str) -> bool {
        &self.method == method && self.path() == path
    }
}

type Responder = dyn Fn(&RecordedCall) -> Result<Option<Value>> + Send + Sync;

/// Transport that answers from a closure and remembers every call
pub struct MockTransport {
    responder: Box<Responder>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    /// Create a mock answering through `responder`
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&RecordedCall) -> Result<Option<Value>> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Build a pagination envelope
    pub fn page(items: Vec<Value>, has_more: bool) -> Value {
        serde_json::json!({ "items": items, "has_more": has_more })
    }

    /// Every call so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Calls made with `method` against `path`
    pub fn calls_to(&self, method: Method, path: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.is(&method, path))
            .collect()
    }

    /// Number of calls so far
    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    fn record(&self, call: RecordedCall) -> Result<Option<Value>> {
        let response = (self.responder)(&call);
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(call);
        response
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
    ) -> Result<Option<Value>> {
        self.record(RecordedCall {
            method,
            endpoint: endpoint.to_string(),
            body,
            file: None,
        })
    }

    async fn upload(
        &self,
        method: Method,
        endpoint: &str,
        props: Value,
        file: &Path,
    ) -> Result<Option<Value>> {
        // Surface missing files the same way the real transport does
        tokio::fs::metadata(file).await?;
        self.record(RecordedCall {
            method,
            endpoint: endpoint.to_string(),
            body: Some(props),
            file: Some(file.to_path_buf()),
        })
    }

    async fn download(&self, endpoint: &str, destination: &Path) -> Result<u64> {
        let response = self.record(RecordedCall {
            method: Method::GET,
            endpoint: endpoint.to_string(),
            body: None,
            file: Some(destination.to_path_buf()),
        })?;

        let bytes = match response {
            Some(Value::String(text)) => text.into_bytes(),
            Some(other) => serde_json::to_vec(&other)?,
            None => Vec::new(),
        };
        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(destination, &bytes).await?;
        Ok(bytes.len() as u64)
    }
}
