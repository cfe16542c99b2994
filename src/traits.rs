//! Request/response capability traits.
//!
//! Each trait has exactly one production implementation today
//! ([`crate::ChatRequest`] and [`crate::ChatResponse`]); the seams exist so
//! that an alternate wire-format variant can slot in behind the same
//! capability set.

use crate::types::{RequestBody, ResponseBody};
use std::collections::HashMap;

/// An HTTP request to the chat service.
pub trait Request: Send + Sync {
    /// The base URI, without query parameters.
    fn uri(&self) -> &str;

    /// The HTTP method, always upper-case.
    fn method(&self) -> &str;

    fn headers(&self) -> &HashMap<String, String>;

    fn body(&self) -> Option<&RequestBody>;

    /// Structural, method-aware check. Does not inspect headers; the
    /// orchestrator separately runs a [`crate::RequestValidator`] with its
    /// own rule set regardless of whether the caller ran this one.
    fn validate(&self) -> bool;

    /// The fully resolved URI, including the encoded query string.
    fn endpoint(&self) -> String;
}

/// An HTTP response from the chat service.
pub trait Response: Send + Sync {
    fn status_code(&self) -> u16;

    fn headers(&self) -> &HashMap<String, String>;

    fn body(&self) -> Option<&ResponseBody>;

    /// Whether the status code was in the 2xx range, or whatever the
    /// constructing side explicitly decided (see the builder contract on
    /// [`crate::ChatResponse`]).
    fn is_successful(&self) -> bool;

    fn error_message(&self) -> Option<&str>;
}
