//! Error types.
//!
//! Only [`GeminiError::Validation`] ever reaches callers of
//! [`crate::ChatModel::call`]. Transport and parse failures are absorbed
//! into a returned [`crate::ChatResponse`] carrying failure indicators.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// A request failed a structural or header/URI rule before dispatch.
    /// Always propagated to the caller, never retried.
    #[error("{0}")]
    Validation(String),

    /// Network/connection failure during dispatch. Downgraded by the
    /// orchestrator into a synthetic 500 response.
    #[error("{0}")]
    Transport(String),

    /// Malformed or unexpected response body shape. Downgraded into an
    /// empty-but-valid response body.
    #[error("{0}")]
    Parse(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl GeminiError {
    /// Create a validation error with a human-readable reason.
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation(reason.into())
    }

    /// Create a transport error carrying a message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Create a parse error carrying a message.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
