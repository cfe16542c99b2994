//! Request body wire shape and the immutable request value object.

use crate::traits::Request;
use crate::types::content::Content;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The exact wire shape sent to the provider:
/// `{"contents":[{"parts":[{"text":"..."}]}]}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequestBody {
    pub contents: Vec<Content>,
}

impl RequestBody {
    pub fn new(contents: Vec<Content>) -> Self {
        Self { contents }
    }

    /// A body carrying a single text prompt.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::from_text(text)],
        }
    }

    pub fn contents(&self) -> &[Content] {
        &self.contents
    }
}

/// An immutable HTTP request for the chat service.
///
/// All mutation goes through the copy-on-write `with_*` methods, which
/// return a new instance and leave the receiver untouched. The method is
/// always stored upper-case. Query parameters keep insertion order, so
/// [`ChatRequest::endpoint`] is deterministic.
#[derive(Clone, PartialEq)]
pub struct ChatRequest {
    uri: String,
    method: String,
    headers: HashMap<String, String>,
    parameters: IndexMap<String, String>,
    body: Option<RequestBody>,
}

impl ChatRequest {
    /// Create a request with empty headers and parameters and no body.
    pub fn new(uri: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            method: method.into().to_uppercase(),
            headers: HashMap::new(),
            parameters: IndexMap::new(),
            body: None,
        }
    }

    /// GET request against `uri` + `key` (key concatenated, not encoded),
    /// with no body.
    pub fn get(uri: &str, key: &str) -> Self {
        Self::new(format!("{uri}{key}"), "GET")
    }

    /// POST request against `uri` + `key` carrying `body`.
    pub fn post(uri: &str, key: &str, body: RequestBody) -> Self {
        let mut request = Self::new(format!("{uri}{key}"), "POST");
        request.body = Some(body);
        request
    }

    /// A copy of this request with one header added or replaced.
    pub fn with_header(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut headers = self.headers.clone();
        headers.insert(key.into(), value.into());
        Self {
            headers,
            ..self.clone()
        }
    }

    /// A copy of this request with one query parameter added or replaced.
    pub fn with_parameter(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut parameters = self.parameters.clone();
        parameters.insert(key.into(), value.into());
        Self {
            parameters,
            ..self.clone()
        }
    }

    /// A copy of this request with the body replaced.
    pub fn with_body(&self, body: RequestBody) -> Self {
        Self {
            body: Some(body),
            ..self.clone()
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn parameters(&self) -> &IndexMap<String, String> {
        &self.parameters
    }

    pub fn body(&self) -> Option<&RequestBody> {
        self.body.as_ref()
    }

    /// Structural, method-aware validity check. Independent from
    /// [`crate::BasicRequestValidator`], which inspects headers and URI
    /// authority; both checks are applied at different points.
    pub fn validate(&self) -> bool {
        match self.method.as_str() {
            "GET" | "DELETE" => !self.uri.is_empty(),
            "POST" | "PUT" | "PATCH" => !self.uri.is_empty() && self.body.is_some(),
            _ => false,
        }
    }

    /// The URI with the percent-encoded query string appended. Returns the
    /// URI unchanged when there are no parameters.
    pub fn endpoint(&self) -> String {
        if self.parameters.is_empty() {
            return self.uri.clone();
        }
        let query = self
            .parameters
            .iter()
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.uri, query)
    }
}

impl Request for ChatRequest {
    fn uri(&self) -> &str {
        self.uri()
    }

    fn method(&self) -> &str {
        self.method()
    }

    fn headers(&self) -> &HashMap<String, String> {
        self.headers()
    }

    fn body(&self) -> Option<&RequestBody> {
        self.body.as_ref()
    }

    fn validate(&self) -> bool {
        self.validate()
    }

    fn endpoint(&self) -> String {
        self.endpoint()
    }
}

// Body text is hidden from debug output.
impl fmt::Debug for ChatRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatRequest")
            .field("uri", &self.uri)
            .field("method", &self.method)
            .field("headers", &self.headers)
            .field("parameters", &self.parameters)
            .field("body", &self.body.as_ref().map(|_| "***"))
            .finish()
    }
}
