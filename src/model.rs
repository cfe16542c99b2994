//! Chat invocation orchestrator: validate, dispatch, map.
//!
//! Failure semantics: validation errors propagate as
//! [`GeminiError::Validation`] before any transport call; transport and
//! body-parse failures are absorbed into a normally returned
//! [`ChatResponse`] carrying failure indicators. Callers check
//! [`ChatResponse::is_successful`] for those.

use crate::error::GeminiError;
use crate::traits::Request;
use crate::transport::{HttpTransport, TransportRequest, TransportResponse};
use crate::types::{Candidate, ChatResponse, Content, Part, ResponseBody, UsageMetadata};
use crate::validation::RequestValidator;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

const CONTENT_TYPE: &str = "Content-Type";
const AUTHORIZATION: &str = "Authorization";
/// Model version stamped onto synthetic error responses.
const ERROR_MODEL_VERSION: &str = "gemini-flash-1.5";
const UNKNOWN_MODEL_VERSION: &str = "unknown";

/// A model that turns a request into a chat response.
#[async_trait]
pub trait Model: Send + Sync {
    async fn call(&self, request: &dyn Request) -> Result<ChatResponse, GeminiError>;
}

/// The production model: runs the validator, dispatches through the
/// transport capability, and maps the provider's JSON envelope into a
/// [`ChatResponse`].
///
/// Holds no per-call state; one instance is safely shared across
/// concurrent calls.
pub struct ChatModel {
    transport: Arc<dyn HttpTransport>,
    validator: Arc<dyn RequestValidator>,
}

impl ChatModel {
    pub fn new(transport: Arc<dyn HttpTransport>, validator: Arc<dyn RequestValidator>) -> Self {
        Self {
            transport,
            validator,
        }
    }

    /// Outgoing headers: the request's own headers with `Content-Type`
    /// defaulted to `application/json` when absent, and any
    /// `Authorization` header removed. The removal is unconditional:
    /// callers supply authentication via the URL, not a bearer header.
    fn outgoing_headers(request_headers: &HashMap<String, String>) -> HashMap<String, String> {
        let mut headers = request_headers.clone();
        if !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE.to_string(), "application/json".to_string());
        }
        headers.remove(AUTHORIZATION);
        headers
    }

    fn map_response(&self, raw: TransportResponse) -> ChatResponse {
        // Multi-valued headers collapse to their first value.
        let headers = raw
            .headers
            .into_iter()
            .map(|(name, values)| (name, values.into_iter().next().unwrap_or_default()))
            .collect();

        ChatResponse::builder()
            .status_code(raw.status)
            .headers(headers)
            .body(map_response_body(&raw.body))
            .build()
    }

    /// Downgrade a transport failure into a returned response: status 500,
    /// unsuccessful, with one synthetic candidate wrapping the error
    /// message.
    fn error_response(&self, error: &GeminiError) -> ChatResponse {
        let content = Content::new(vec![Part::from_value(error)]);
        let candidate = Candidate::new(content, "ERROR", 0.0);
        let body = ResponseBody::new(vec![candidate], None, ERROR_MODEL_VERSION);

        ChatResponse::builder()
            .status_code(500)
            .successful(false)
            .error_message(error.to_string())
            .body(body)
            .build()
    }
}

#[async_trait]
impl Model for ChatModel {
    async fn call(&self, request: &dyn Request) -> Result<ChatResponse, GeminiError> {
        self.validator.validate(request)?;

        let body = match request.body().map(serde_json::to_value).transpose() {
            Ok(body) => body,
            Err(error) => return Ok(self.error_response(&GeminiError::Json(error))),
        };
        let transport_request = TransportRequest {
            method: request.method().to_string(),
            url: request.endpoint(),
            headers: Self::outgoing_headers(request.headers()),
            body,
        };

        match self.transport.execute(transport_request).await {
            Ok(raw) => Ok(self.map_response(raw)),
            Err(error) => Ok(self.error_response(&error)),
        }
    }
}

/// Parse the raw body, falling back to the empty body on any failure.
fn map_response_body(raw: &str) -> ResponseBody {
    match parse_response_body(raw) {
        Ok(body) => body,
        Err(error) => {
            warn!("error parsing response body: {error}");
            ResponseBody::empty()
        }
    }
}

fn parse_response_body(raw: &str) -> Result<ResponseBody, GeminiError> {
    let root: Value = serde_json::from_str(raw)?;

    let mut candidates = Vec::new();
    if let Some(entries) = root.get("candidates").and_then(Value::as_array) {
        for entry in entries {
            let contents = parse_contents(entry.get("content"));
            // A candidate with no textual content aborts the whole parse;
            // the caller falls back to the empty body.
            let candidate = Candidate::from_contents(contents)
                .ok_or_else(|| GeminiError::parse("candidate has no textual content"))?;
            candidates.push(candidate);
        }
    }

    let usage_metadata = Some(parse_usage_metadata(root.get("usageMetadata")));
    let model_version = root
        .get("model")
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_MODEL_VERSION);

    Ok(ResponseBody::new(candidates, usage_metadata, model_version))
}

/// One content per non-empty `text` part. Parts with an absent or empty
/// `text` field are skipped.
fn parse_contents(content: Option<&Value>) -> Vec<Content> {
    let mut contents = Vec::new();
    if let Some(parts) = content.and_then(|c| c.get("parts")).and_then(Value::as_array) {
        for part in parts {
            let text = part.get("text").and_then(Value::as_str).unwrap_or_default();
            if !text.is_empty() {
                contents.push(Content::new(vec![Part::new(text)]));
            }
        }
    }
    contents
}

/// Integer-valued fields only; everything else is silently skipped.
fn parse_usage_metadata(node: Option<&Value>) -> UsageMetadata {
    let mut usage = UsageMetadata::new();
    if let Some(Value::Object(fields)) = node {
        for (key, value) in fields {
            if let Some(count) = value.as_i64() {
                usage.put(key, count);
            }
        }
    }
    usage
}
