use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Engine-level failures. Disabled events and unknown alert ids are not
/// errors (they signal through `None`/`false`); the only hard failure the
/// engine itself produces is an unsupported export format.
#[derive(Debug, Clone, PartialEq)]
pub enum AuditError {
    UnsupportedFormat(String),
}

impl std::fmt::Display for AuditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditError::UnsupportedFormat(fmt) => {
                write!(f, "Unsupported export format: {fmt}")
            }
        }
    }
}

impl std::error::Error for AuditError {}

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            AppError::Internal(msg) => write!(f, "Internal Error: {msg}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

impl From<AuditError> for AppError {
    fn from(err: AuditError) -> Self {
        match err {
            AuditError::UnsupportedFormat(_) => AppError::BadRequest(err.to_string()),
        }
    }
}
