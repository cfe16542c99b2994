//! Convenience facade for one-shot chat calls.

use crate::error::GeminiError;
use crate::model::{ChatModel, Model};
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::types::{ChatRequest, ChatResponse, RequestBody};
use crate::validation::BasicRequestValidator;
use std::sync::Arc;

/// Owns a [`ChatModel`] wired with the production transport and the
/// default validator, and offers prompt-in/text-out helpers on top of it.
pub struct ChatClient {
    model: ChatModel,
}

impl ChatClient {
    /// A client backed by a fresh `reqwest::Client`.
    pub fn new() -> Self {
        Self::with_transport(Arc::new(ReqwestTransport::default()))
    }

    /// A client backed by a caller-supplied transport.
    pub fn with_transport(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            model: ChatModel::new(transport, Arc::new(BasicRequestValidator)),
        }
    }

    pub fn model(&self) -> &ChatModel {
        &self.model
    }

    /// POST `prompt` to `base_url` + `api_key` and return the full
    /// response. The API key travels in the URL; see the crate docs for
    /// why an `Authorization` header would be dropped anyway.
    pub async fn send(
        &self,
        base_url: &str,
        api_key: &str,
        prompt: impl Into<String>,
    ) -> Result<ChatResponse, GeminiError> {
        let request = ChatRequest::post(base_url, api_key, RequestBody::from_text(prompt))
            .with_header("Content-Type", "application/json");
        self.model.call(&request).await
    }

    /// Like [`ChatClient::send`], but extract the first candidate's text.
    pub async fn ask(
        &self,
        base_url: &str,
        api_key: &str,
        prompt: impl Into<String>,
    ) -> Result<String, GeminiError> {
        let response = self.send(base_url, api_key, prompt).await?;
        response
            .body()
            .and_then(|body| body.text())
            .map(str::to_string)
            .ok_or_else(|| GeminiError::parse("no text in response"))
    }
}

impl Default for ChatClient {
    fn default() -> Self {
        Self::new()
    }
}
