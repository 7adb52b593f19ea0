//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::models::ValidationError;
use crate::services::checkout::CheckoutError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Store operation failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Session store operation failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Write-time validation failed on a specific field.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::Repository(RepositoryError::NotFound) => {
                Self::NotFound("resource not found".to_string())
            }
            CheckoutError::Repository(e) => Self::Repository(e),
            CheckoutError::ProductNotFound(id) => Self::NotFound(format!("product {id}")),
            CheckoutError::SetNotFound(slug) => Self::NotFound(format!("set '{slug}'")),
            CheckoutError::OrderNotFound(id) => Self::NotFound(format!("order {id}")),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(
            self,
            Self::Repository(
                RepositoryError::Database(_) | RepositoryError::DataCorruption(_)
            ) | Self::Session(_)
                | Self::Internal(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Repository(err) => match err {
                RepositoryError::NotFound => StatusCode::NOT_FOUND,
                RepositoryError::Conflict(_) => StatusCode::CONFLICT,
                RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Session(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let body = match &self {
            Self::Repository(RepositoryError::NotFound) => json!({"error": "not found"}),
            Self::Repository(RepositoryError::Conflict(message)) => json!({"error": message}),
            Self::Repository(_) | Self::Session(_) | Self::Internal(_) => {
                json!({"error": "internal server error"})
            }
            Self::NotFound(what) => json!({"error": format!("not found: {what}")}),
            Self::Validation(err) => json!({
                "error": "validation failed",
                "field": err.field,
                "message": err.message,
            }),
            Self::BadRequest(message) => json!({"error": message}),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
