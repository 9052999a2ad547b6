use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use mentora_graph::GraphError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`GraphError`] for store-side failures and adds HTTP-specific
/// variants. Implements [`IntoResponse`] to produce consistent JSON error
/// responses of the shape `{"error": ..., "code": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A store-side failure from `mentora-graph`.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Bad input shape or value; the operation was not attempted.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A resource addressed by the handler itself does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// A uniqueness conflict (e.g. duplicate username).
    #[error("{0}")]
    Conflict(String),

    /// Missing or malformed credentials / Authorization header.
    #[error("{0}")]
    Unauthorized(String),

    /// A syntactically present but invalid or expired token.
    #[error("{0}")]
    Forbidden(String),

    /// An error payload relayed from the upstream generative-AI API.
    #[error("Upstream AI error")]
    Upstream(serde_json::Value),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Graph(err) => classify_graph_error(err),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::NotFound { entity, id } => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} with id {id} not found"),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            AppError::Upstream(payload) => {
                let body = json!({
                    "error": "Upstream AI error",
                    "code": "UPSTREAM_ERROR",
                    "detail": payload,
                });
                return (StatusCode::BAD_GATEWAY, axum::Json(body)).into_response();
            }
            AppError::Internal(msg) => {
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

/// Classify a graph error into an HTTP status, error code, and message.
///
/// `NotFound` maps to 404. Everything else is a store fault: the original
/// message goes to the log, the response carries a sanitized one.
fn classify_graph_error(err: &GraphError) -> (StatusCode, &'static str, String) {
    match err {
        GraphError::NotFound { label, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{label} with id {id} not found"),
        ),
        other => {
            tracing::error!(error = %other, "Graph store error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
