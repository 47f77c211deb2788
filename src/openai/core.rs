use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use thiserror::Error;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum Role {
    System,
    Assistant,
    User,
    // Roles the relay doesn't know about are passed through to the
    // API untouched and it's up to the provider to accept or reject
    // them.
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::System => "system",
            Role::Assistant => "assistant",
            Role::User => "user",
            Role::Other(role) => role.as_str(),
        }
    }
}

impl From<String> for Role {
    fn from(role: String) -> Self {
        match role.as_str() {
            "system" => Role::System,
            "assistant" => Role::Assistant,
            "user" => Role::User,
            _ => Role::Other(role),
        }
    }
}

impl From<&str> for Role {
    fn from(role: &str) -> Self {
        Role::from(role.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(role) => role,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A chat message as the API sees it. `content` is usually a string
/// but can be `null` or a list of content parts, and any other keys
/// (`name`, `tool_calls`, ...) are carried along in `extra`.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Message {
            role,
            content: Value::String(content.to_string()),
            extra: Map::new(),
        }
    }
}

/// Reasons a completion could not be produced. The `Display` output
/// is what ends up in front of the user so keep it readable.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request never got a response (connect, TLS, timeout, body
    /// read, etc.)
    #[error("{0}")]
    Transport(String),
    /// The API answered with a non-success status
    #[error("Error code: {status} - {message}")]
    Api { status: u16, message: String },
    /// The API answered successfully but not with something that
    /// looks like a chat completion
    #[error("{0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest hides the interesting part (connection refused,
        // timed out) in the source chain
        let mut details = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            details.push_str(&format!(": {}", cause));
            source = cause.source();
        }
        ProviderError::Transport(details)
    }
}

impl ProviderError {
    /// Build an error from a failed API response. OpenAI compatible
    /// servers respond with `{"error": {"message": "..."}}`, fall back
    /// to the raw body or the status reason when that's not the case.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v["error"]["message"].as_str().map(String::from))
            .or_else(|| {
                let trimmed = body.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });

        ProviderError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

/// Anything that can turn a conversation into the next assistant
/// reply.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, model: &str, messages: &[Message]) -> Result<String, ProviderError>;
}

/// Request a chat completion from an OpenAI compatible API and return
/// the content of the first choice.
pub async fn completion(
    http: &reqwest::Client,
    messages: &[Message],
    api_hostname: &str,
    api_key: &str,
    model: &str,
    timeout: Duration,
) -> Result<String, ProviderError> {
    let payload = json!({
        "model": model,
        "messages": messages,
    });
    let url = format!("{}/v1/chat/completions", api_hostname.trim_end_matches("/"));
    let response = http
        .post(url)
        .bearer_auth(api_key)
        .timeout(timeout)
        .json(&payload)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(ProviderError::from_response(status, &body));
    }

    let resp: Value = serde_json::from_str(&body).map_err(|e| {
        ProviderError::MalformedResponse(format!("Invalid JSON in completion response: {}", e))
    })?;

    resp["choices"][0]["message"]["content"]
        .as_str()
        .map(String::from)
        .ok_or_else(|| {
            ProviderError::MalformedResponse(format!("No message received. Resp: {}", resp))
        })
}
