//! Unified error type (spec.md §7) and its HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("missing or unknown auth key")]
    Auth,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("not found")]
    NotFound,

    #[error("backend error: {0}")]
    Backend(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Auth => {
                tracing::warn!("rejected request: missing or unknown auth key");
                StatusCode::FORBIDDEN.into_response()
            }
            AppError::Validation(msg) => {
                tracing::warn!(error = %msg, "validation error");
                (StatusCode::BAD_REQUEST, msg.clone()).into_response()
            }
            AppError::NotFound => StatusCode::NOT_FOUND.into_response(),
            AppError::Backend(msg) => {
                tracing::error!(error = %msg, "backend error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
