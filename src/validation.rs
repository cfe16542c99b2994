//! Pre-dispatch request validation.
//!
//! This gate is independent from [`crate::ChatRequest::validate`]: that one
//! is a structural, method-aware check callers may run themselves, while
//! this one inspects URI authority and headers and is always run by the
//! orchestrator before dispatch. Both rule sets are kept distinct on
//! purpose.

use crate::error::GeminiError;
use crate::traits::Request;
use std::collections::HashMap;
use url::Url;

/// A rule set applied to a request before dispatch. Pure gate, no side
/// effects on success.
pub trait RequestValidator: Send + Sync {
    fn validate(&self, request: &dyn Request) -> Result<(), GeminiError>;
}

/// The default rule set: well-formed URI with a host, non-empty method,
/// and a JSON content type.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicRequestValidator;

impl BasicRequestValidator {
    fn validate_uri(&self, uri: &str) -> Result<(), GeminiError> {
        if uri.is_empty() {
            return Err(GeminiError::validation("URI is null or empty"));
        }
        match Url::parse(uri) {
            Ok(url) => {
                if url.host_str().is_none() {
                    return Err(GeminiError::validation("Unauthorized domain"));
                }
                Ok(())
            }
            Err(_) => Err(GeminiError::validation(format!(
                "Invalid URI format: {uri}"
            ))),
        }
    }

    fn validate_headers(&self, headers: &HashMap<String, String>) -> Result<(), GeminiError> {
        let content_type = headers.get("Content-Type");
        match content_type {
            Some(value) if value.starts_with("application/json") => Ok(()),
            _ => Err(GeminiError::validation(
                "Invalid or missing Content-Type header",
            )),
        }
    }

    fn validate_method(&self, method: &str) -> Result<(), GeminiError> {
        if method.is_empty() {
            return Err(GeminiError::validation("Method is null or empty"));
        }
        Ok(())
    }
}

impl RequestValidator for BasicRequestValidator {
    fn validate(&self, request: &dyn Request) -> Result<(), GeminiError> {
        self.validate_uri(request.uri())?;
        self.validate_headers(request.headers())?;
        self.validate_method(request.method())?;
        Ok(())
    }
}
