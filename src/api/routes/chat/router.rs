//! Router for the chat API

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    routing::post,
};

use super::public;
use crate::api::public::ApiError;
use crate::api::state::AppState;

type SharedState = Arc<AppState>;

/// Relay a conversation to the language model and respond with the
/// next message.
///
/// Takes the raw body rather than `Json` so that malformed payloads
/// get the relay's error response instead of axum's rejection.
async fn chat_handler(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<public::ChatResponse>, ApiError> {
    let reply = state.relay.handle_chat(&body).await?;
    Ok(Json(public::ChatResponse::reply(&reply)))
}

/// Create the chat router. Long conversations are sent whole and
/// trimmed by the relay, so the request body size is not capped.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", post(chat_handler))
        .layer(DefaultBodyLimit::disable())
}
