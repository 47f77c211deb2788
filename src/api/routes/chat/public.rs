//! Public types for the chat API
use serde::{Deserialize, Serialize};
use crate::openai::Message;

/// The body clients send to `POST /chat`. The handler validates the
/// raw body itself so this is mostly useful for building requests.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
}

/// Exactly one of `response` or `error` is set, the other is
/// serialized as `null`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ChatResponse {
    pub response: Option<String>,
    pub error: Option<String>,
}

impl ChatResponse {
    pub fn reply(content: &str) -> Self {
        Self {
            response: Some(content.into()),
            error: None,
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            response: None,
            error: Some(message.into()),
        }
    }
}
