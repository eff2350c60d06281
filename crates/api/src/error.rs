use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use workbroker_cache::CacheStoreError;
use workbroker_core::error::CoreError;

use crate::queue::SubmissionError;

/// Application-level error type for HTTP handlers and the dispatch flow.
///
/// Wraps the domain error taxonomy and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level request-gating error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A cache store fault (distinct from a miss, which is not an error).
    #[error(transparent)]
    CacheStore(#[from] CacheStoreError),

    /// The worker pool enqueue failed.
    #[error(transparent)]
    Submission(#[from] SubmissionError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Stable machine-readable code, also used on the WebSocket error frame.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Core(CoreError::Validation(_)) => "VALIDATION_ERROR",
            AppError::Core(CoreError::ExpiredRequest { .. }) => "EXPIRED_REQUEST",
            AppError::Core(CoreError::Internal(_)) => "INTERNAL_ERROR",
            AppError::CacheStore(_) => "CACHE_STORE_ERROR",
            AppError::Submission(_) => "SUBMISSION_FAILED",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::ExpiredRequest { .. } => {
                    (StatusCode::BAD_REQUEST, "EXPIRED_REQUEST", core.to_string())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            AppError::CacheStore(err) => {
                tracing::error!(error = %err, "Cache store error");
                (
                    StatusCode::BAD_GATEWAY,
                    "CACHE_STORE_ERROR",
                    "Cache store unavailable".to_string(),
                )
            }

            AppError::Submission(err) => {
                tracing::error!(error = %err, "Worker submission failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "SUBMISSION_FAILED",
                    "Work could not be handed to the worker pool".to_string(),
                )
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
