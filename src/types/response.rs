//! Response body wire types and the response value object.

use crate::error::GeminiError;
use crate::traits::Response;
use crate::types::content::Content;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Token usage reported by the provider.
///
/// Keys are whatever integer-valued fields the provider's `usageMetadata`
/// object carried (e.g. `promptTokenCount`); non-integer fields are skipped
/// at parse time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct UsageMetadata {
    token_counts: HashMap<String, i64>,
}

impl UsageMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_counts(token_counts: HashMap<String, i64>) -> Self {
        Self { token_counts }
    }

    pub fn put(&mut self, key: impl Into<String>, count: i64) {
        self.token_counts.insert(key.into(), count);
    }

    /// The count under `key`, defaulting to 0 when absent.
    pub fn get(&self, key: &str) -> i64 {
        self.token_counts.get(key).copied().unwrap_or(0)
    }

    pub fn token_counts(&self) -> &HashMap<String, i64> {
        &self.token_counts
    }

    pub fn is_empty(&self) -> bool {
        self.token_counts.is_empty()
    }
}

/// One generated alternative returned by the provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_logprobs: Option<f64>,
}

impl Candidate {
    pub fn new(content: Content, finish_reason: impl Into<String>, avg_logprobs: f64) -> Self {
        Self {
            content: Some(content),
            finish_reason: Some(finish_reason.into()),
            avg_logprobs: Some(avg_logprobs),
        }
    }

    /// Build a candidate from a parsed content list, retaining only the
    /// first content and discarding the rest. Finish reason and logprobs
    /// are left unset on this path. Returns `None` for an empty list.
    pub fn from_contents(contents: Vec<Content>) -> Option<Self> {
        let content = contents.into_iter().next()?;
        Some(Self {
            content: Some(content),
            finish_reason: None,
            avg_logprobs: None,
        })
    }

    pub fn content(&self) -> Option<&Content> {
        self.content.as_ref()
    }

    pub fn finish_reason(&self) -> Option<&str> {
        self.finish_reason.as_deref()
    }

    pub fn avg_logprobs(&self) -> Option<f64> {
        self.avg_logprobs
    }
}

/// Parsed response body: candidates, usage metadata, and model version.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    pub candidates: Vec<Candidate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<UsageMetadata>,
    pub model_version: String,
}

impl ResponseBody {
    pub fn new(
        candidates: Vec<Candidate>,
        usage_metadata: Option<UsageMetadata>,
        model_version: impl Into<String>,
    ) -> Self {
        Self {
            candidates,
            usage_metadata,
            model_version: model_version.into(),
        }
    }

    /// The fallback body used when parsing fails: no candidates, no usage
    /// metadata, model version `"unknown"`.
    pub fn empty() -> Self {
        Self {
            candidates: Vec::new(),
            usage_metadata: None,
            model_version: "unknown".to_string(),
        }
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn usage_metadata(&self) -> Option<&UsageMetadata> {
        self.usage_metadata.as_ref()
    }

    pub fn model_version(&self) -> &str {
        &self.model_version
    }

    /// Text of the first part of the first candidate, if any.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(Candidate::content)
            .and_then(Content::first_text)
    }
}

/// The response value object handed back by [`crate::ChatModel::call`].
///
/// Constructed fresh per call, either from a transport response or from the
/// error-synthesizing path; never reused.
#[derive(Clone, Default, PartialEq)]
pub struct ChatResponse {
    status_code: u16,
    headers: HashMap<String, String>,
    body: Option<ResponseBody>,
    successful: bool,
    error_message: Option<String>,
}

impl ChatResponse {
    pub fn builder() -> ChatResponseBuilder {
        ChatResponseBuilder::new()
    }

    /// A synthetic failed response for an error that never produced a body:
    /// status 500, unsuccessful, message only.
    pub fn from_error(error: &GeminiError) -> Self {
        Self::builder()
            .status_code(500)
            .successful(false)
            .error_message(error.to_string())
            .build()
    }

    /// Set the status code and recompute `successful` from the 2xx range.
    pub fn set_status_code(&mut self, status_code: u16) {
        self.status_code = status_code;
        self.successful = (200..300).contains(&status_code);
    }

    pub fn set_headers(&mut self, headers: HashMap<String, String>) {
        self.headers = headers;
    }

    pub fn set_body(&mut self, body: ResponseBody) {
        self.body = Some(body);
    }

    pub fn set_successful(&mut self, successful: bool) {
        self.successful = successful;
    }

    pub fn set_error_message(&mut self, error_message: impl Into<String>) {
        self.error_message = Some(error_message.into());
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn body(&self) -> Option<&ResponseBody> {
        self.body.as_ref()
    }

    pub fn is_successful(&self) -> bool {
        self.successful
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Deserialize the parsed body into a caller-supplied type.
    pub fn parse_body<T: DeserializeOwned>(&self) -> Result<T, GeminiError> {
        let body = self
            .body
            .as_ref()
            .ok_or_else(|| GeminiError::parse("response has no body"))?;
        Ok(serde_json::from_value(serde_json::to_value(body)?)?)
    }
}

impl Response for ChatResponse {
    fn status_code(&self) -> u16 {
        self.status_code
    }

    fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    fn body(&self) -> Option<&ResponseBody> {
        self.body.as_ref()
    }

    fn is_successful(&self) -> bool {
        self.successful
    }

    fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

// Body content is hidden from debug output.
impl fmt::Debug for ChatResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatResponse")
            .field("status_code", &self.status_code)
            .field("headers", &self.headers)
            .field("body", &self.body.as_ref().map(|_| "***"))
            .field("successful", &self.successful)
            .field("error_message", &self.error_message)
            .finish()
    }
}

/// Builder for [`ChatResponse`].
///
/// `status_code` recomputes `successful` from the 2xx range; a later
/// `successful` call overrides it. Last write wins, no cross-validation.
#[derive(Debug, Default)]
pub struct ChatResponseBuilder {
    response: ChatResponse,
}

impl ChatResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status_code(mut self, status_code: u16) -> Self {
        self.response.set_status_code(status_code);
        self
    }

    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.response.set_headers(headers);
        self
    }

    pub fn body(mut self, body: ResponseBody) -> Self {
        self.response.set_body(body);
        self
    }

    pub fn successful(mut self, successful: bool) -> Self {
        self.response.set_successful(successful);
        self
    }

    pub fn error_message(mut self, error_message: impl Into<String>) -> Self {
        self.response.set_error_message(error_message);
        self
    }

    pub fn build(self) -> ChatResponse {
        self.response
    }
}
