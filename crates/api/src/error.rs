use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tomato_core::error::CoreError;

use crate::response::ErrorBody;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce `{ "success": false, "error": ... }`
/// bodies. Store details are logged, never sent to the client.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `tomato_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A store failure, reported to the client with the route's message.
    #[error("{message}: {source}")]
    Failed {
        message: &'static str,
        source: CoreError,
    },

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
    /// Build a `map_err` adapter that reports store failures as `message`
    /// and passes validation and not-found errors through unchanged.
    pub fn failed(message: &'static str) -> impl FnOnce(CoreError) -> AppError {
        move |err| match err {
            CoreError::Store(_) => AppError::Failed {
                message,
                source: err,
            },
            other => AppError::Core(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, .. } => {
                    (StatusCode::NOT_FOUND, format!("{entity} not found"))
                }
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                CoreError::Store(err) => {
                    tracing::error!(error = %err, "Unhandled store error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_string(),
                    )
                }
            },

            // --- Store failures with a route-specific message ---
            AppError::Failed { message, source } => {
                tracing::error!(error = %source, "{message}");
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, axum::Json(ErrorBody::new(message))).into_response()
    }
}
