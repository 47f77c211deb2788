//! Test utilities for integration tests
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, body::Body, http::Request};
use serde_json::Value;

use chat_relay::api::AppState;
use chat_relay::api::app;
use chat_relay::core::AppConfig;

/// The chat page shipped with the repo
pub fn web_ui_dir() -> String {
    format!("{}/web-ui", env!("CARGO_MANIFEST_DIR"))
}

/// Configuration pointing the relay at `api_hostname`, typically a
/// `mockito` server standing in for the OpenAI API.
pub fn test_config(api_hostname: &str) -> AppConfig {
    AppConfig {
        openai_api_key: Some(String::from("test-api-key")),
        openai_api_hostname: api_hostname.to_string(),
        openai_model: String::from("gpt-3.5-turbo"),
        request_timeout: Duration::from_secs(5),
        static_dir: web_ui_dir(),
        ..AppConfig::default()
    }
}

/// Creates a test application router for the given configuration.
pub fn test_app_with_config(config: AppConfig) -> Router {
    let app_state = AppState::from_config(config);
    app(Arc::new(app_state))
}

/// Creates a test application router that talks to `api_hostname`.
pub fn test_app(api_hostname: &str) -> Router {
    test_app_with_config(test_config(api_hostname))
}

/// Builds a `POST /chat` request with a JSON body.
pub fn chat_request(payload: &Value) -> Request<Body> {
    raw_chat_request(payload.to_string())
}

/// Builds a `POST /chat` request with an arbitrary body.
pub fn raw_chat_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .uri("/chat")
        .method("POST")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

/// A chat completion response body as returned by the OpenAI API
pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1694268190,
        "model": "gpt-3.5-turbo",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_to_json(body: Body) -> Value {
    serde_json::from_str(&body_to_string(body).await).unwrap()
}
