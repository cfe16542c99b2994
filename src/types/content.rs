//! Content-tree containers shared by request and response bodies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest unit of textual content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Part {
    pub text: String,
}

impl Part {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Build a part from any prompt value, taking its textual
    /// representation from its `Display` impl.
    pub fn from_value<T: fmt::Display>(value: &T) -> Self {
        Self {
            text: value.to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Ordered group of parts representing one message/turn. Part order is
/// concatenation order for rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Content {
    pub parts: Vec<Part>,
}

impl Content {
    pub fn new(parts: Vec<Part>) -> Self {
        Self { parts }
    }

    /// One content block holding a single text part.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part::new(text)],
        }
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Text of the first part, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.parts.first().map(Part::text)
    }
}
