//! Single-request transport to the note service
//!
//! A [`Transport`] performs exactly one HTTP exchange per call and folds every
//! outcome into [`crate::Result`]. No retries happen at this layer.

use crate::config::JoplinConfig;
use crate::error::{JoplinError, Result};
use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde_json::Value;
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Trait for exchanging requests with the note service
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue one JSON request
    ///
    /// `endpoint` is relative to the service root and may already carry a query
    /// string. Returns `None` when the service answered with an empty body.
    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
    ) -> Result<Option<Value>>;

    /// Send a multipart request with a JSON `props` part and the file as `data`
    async fn upload(
        &self,
        method: Method,
        endpoint: &str,
        props: Value,
        file: &Path,
    ) -> Result<Option<Value>>;

    /// Stream a binary response body into `destination`, returning the byte count
    async fn download(&self, endpoint: &str, destination: &Path) -> Result<u64>;
}

/// [`Transport`] backed by `reqwest`
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpTransport {
    /// Create a transport for the given configuration
    pub fn new(config: &JoplinConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a transport reusing an existing [`reqwest::Client`]
    pub fn with_client(client: reqwest::Client, config: &JoplinConfig) -> Self {
        Self {
            client,
            base_url: config.base_url(),
            token: config.token.clone(),
        }
    }

    /// Absolute URL for an endpoint with the token appended as a query parameter
    fn url(&self, endpoint: &str) -> String {
        let mut url = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        if let Some(token) = &self.token {
            url.push(if endpoint.contains('?') { '&' } else { '?' });
            url.push_str("token=");
            url.extend(url::form_urlencoded::byte_serialize(token.as_bytes()));
        }
        url
    }

    fn connection_error(&self, error: reqwest::Error) -> JoplinError {
        // The request URL carries the token, keep it out of messages
        JoplinError::Connection {
            url: self.base_url.clone(),
            reason: error.without_url().to_string(),
        }
    }

    /// Send a request and turn non-success statuses into [`JoplinError::Api`]
    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(JoplinError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Read a successful response body as optional JSON
    async fn parse_body(&self, response: reqwest::Response) -> Result<Option<Value>> {
        let text = response
            .text()
            .await
            .map_err(|e| self.connection_error(e))?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&text)?))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
    ) -> Result<Option<Value>> {
        tracing::debug!("{} {}", method, endpoint);

        let mut builder = self.client.request(method, self.url(endpoint));
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        let response = self.send(builder).await?;
        self.parse_body(response).await
    }

    async fn upload(
        &self,
        method: Method,
        endpoint: &str,
        props: Value,
        file: &Path,
    ) -> Result<Option<Value>> {
        tracing::debug!("{} {} (multipart, {})", method, endpoint, file.display());

        let handle = tokio::fs::File::open(file).await?;
        let length = handle.metadata().await?.len();
        let filename = file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let stream = tokio_util::io::ReaderStream::new(handle);
        let data = Part::stream_with_length(reqwest::Body::wrap_stream(stream), length)
            .file_name(filename);
        let form = Form::new()
            .text("props", serde_json::to_string(&props)?)
            .part("data", data);

        let builder = self.client.request(method, self.url(endpoint)).multipart(form);
        let response = self.send(builder).await?;
        self.parse_body(response).await
    }

    async fn download(&self, endpoint: &str, destination: &Path) -> Result<u64> {
        tracing::debug!("GET {} -> {}", endpoint, destination.display());

        let response = self.send(self.client.get(self.url(endpoint))).await?;

        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let mut file = tokio::fs::File::create(destination).await?;

        let mut written = 0u64;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| self.connection_error(e))?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        Ok(written)
    }
}
