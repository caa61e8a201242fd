//! Error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use data_validator::ValidationError;
use inference_engine::InferenceError;
use metrics::counter;
use serde_json::json;
use std::any::Any;
use thiserror::Error;

/// Errors returned by request handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Caller sent an unusable body (400)
    #[error("{0}")]
    BadRequest(String),

    /// Artifacts failed to load at startup (500)
    #[error("Model not loaded.")]
    ModelUnavailable,

    /// Unexpected failure while computing a prediction (500)
    #[error("Internal prediction error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match &self {
            ApiError::BadRequest(msg) => {
                tracing::warn!("Rejected prediction request: {}", msg);
                (StatusCode::BAD_REQUEST, "client", msg.as_str())
            }
            ApiError::ModelUnavailable => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "unavailable",
                "Model not loaded.",
            ),
            ApiError::Internal(detail) => {
                tracing::error!("Prediction error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal prediction error.",
                )
            }
        };

        counter!("potability_request_errors_total", "kind" => kind).increment(1);

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<InferenceError> for ApiError {
    fn from(err: InferenceError) -> Self {
        match err {
            InferenceError::ModelUnavailable(_) => ApiError::ModelUnavailable,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// Convert a handler panic into the generic internal-error response
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ApiError::Internal(format!("handler panicked: {}", detail)).into_response()
}
