//! gemini-chat
//!
//! A typed, one-shot client for the Gemini `generateContent` HTTP API.
//! Build an immutable [`ChatRequest`], invoke it through a [`ChatModel`],
//! and inspect the strongly typed [`ChatResponse`].
//!
//! Two behaviors are deliberate and worth knowing up front:
//! - [`ChatModel::call`] strips any `Authorization` header before dispatch;
//!   callers authenticate through the URL (API key) instead.
//! - Transport and body-parse failures are never returned as errors. They
//!   are absorbed into a normally returned [`ChatResponse`], so callers
//!   check [`ChatResponse::is_successful`] and only need to handle
//!   [`GeminiError::Validation`] from pre-dispatch checks.
#![deny(unsafe_code)]

pub mod client;
pub mod error;
pub mod model;
pub mod traits;
pub mod transport;
pub mod types;
pub mod validation;

pub use client::ChatClient;
pub use error::GeminiError;
pub use model::{ChatModel, Model};
pub use traits::{Request, Response};
pub use transport::{HttpTransport, ReqwestTransport, TransportRequest, TransportResponse};
pub use types::{
    Candidate, ChatRequest, ChatResponse, Content, Part, RequestBody, ResponseBody, UsageMetadata,
};
pub use validation::{BasicRequestValidator, RequestValidator};
