//! Public API types

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;

use crate::relay::RelayError;

// Errors

pub struct ApiError(RelayError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Convert `ApiError` into an Axum compatible response. The body has
/// the same shape as a successful chat response so clients only ever
/// deal with one format.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Always log the error
        if status.is_server_error() {
            tracing::error!("{}", self.0);
        } else {
            tracing::warn!("Rejected chat request: {}", self.0);
        }

        (status, Json(chat::ChatResponse::error(&self.0.to_string()))).into_response()
    }
}

/// Enables using `?` on functions that return `Result<_,
/// RelayError>` to turn them into `Result<_, ApiError>`
impl<E> From<E> for ApiError
where
    E: Into<RelayError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

// Re-export public types from each route

pub mod chat {
    pub use crate::api::routes::chat::public::*;
}
