//! HTTP transport abstraction.
//!
//! The orchestrator talks to the network through an injectable transport,
//! so tests can observe the final URL/headers/body and return a synthetic
//! response without going through `reqwest`. Retries, timeouts, and TLS
//! configuration belong to the transport implementation, not to the
//! orchestrator.

use crate::error::GeminiError;
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

/// Transport-level request data.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: String,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<serde_json::Value>,
}

/// Transport-level response data. Headers keep all values per name; the
/// response mapper takes the first.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub headers: HashMap<String, Vec<String>>,
    pub body: String,
}

/// Capability for issuing one HTTP round trip.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, GeminiError>;
}

/// Production transport backed by a shared `reqwest::Client`.
///
/// The client holds the connection pool and is cheap to clone; one
/// `ReqwestTransport` can safely be shared across concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, GeminiError> {
        let method = reqwest::Method::from_bytes(request.method.as_bytes()).map_err(|_| {
            GeminiError::transport(format!("unsupported HTTP method: {}", request.method))
        })?;

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        debug!(method = %request.method, url = %request.url, "dispatching chat request");
        let response = builder.send().await?;

        let status = response.status().as_u16();
        let mut headers: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in response.headers() {
            headers
                .entry(name.as_str().to_string())
                .or_default()
                .push(value.to_str().unwrap_or_default().to_string());
        }
        let body = response.text().await?;

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}
