//! Wire types for the Gemini generateContent API.

mod content;
mod request;
mod response;

pub use content::{Content, Part};
pub use request::{ChatRequest, RequestBody};
pub use response::{Candidate, ChatResponse, ChatResponseBuilder, ResponseBody, UsageMetadata};
