//! Unified error handling
//!
//! [`AppError`] is the single error type crossing the API boundary. Every
//! failure path maps to an HTTP status plus a stable code and a
//! human-readable message; nothing here is fatal to the process, the server
//! keeps serving after any of these.
//!
//! # Error codes
//!
//! | Code | Meaning |
//! |-------|---------------------|
//! | E0002 | Validation failed |
//! | E0003 | Resource not found |
//! | E0004 | Resource conflict |
//! | E0006 | Invalid request |
//! | E9002 | Database error |
//! | E9003 | Document rendering |
//! | E9001 | Internal error |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::db::repository::RepoError;
use crate::documents::DocumentError;

/// Standard API error body
///
/// ```json
/// { "code": "E0003", "message": "Order service_order:123 not found" }
/// ```
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Input failed validation (400)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Resource does not exist (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Resource already exists (409)
    #[error("Resource already exists: {0}")]
    Conflict(String),

    /// Malformed request (400)
    #[error("Invalid request: {0}")]
    Invalid(String),

    /// Database failure (500). The message names the failing step.
    #[error("Database error: {0}")]
    Database(String),

    /// Document assembly or rendering failure (500)
    #[error("Document error: {0}")]
    Document(String),

    /// Anything else (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    /// Wrap a repository error, prefixing the failing step so the surfaced
    /// message reads "error saving materials: ..." style.
    pub fn step(step: &str, err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => Self::NotFound(msg),
            RepoError::Duplicate(msg) => Self::Conflict(msg),
            RepoError::Validation(msg) => Self::Validation(msg),
            RepoError::Database(msg) => Self::Database(format!("{step}: {msg}")),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "E0004", msg.clone()),
            AppError::Invalid(msg) => (StatusCode::BAD_REQUEST, "E0006", msg.clone()),
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9002",
                    "Database error".to_string(),
                )
            }
            AppError::Document(msg) => {
                error!(target: "documents", error = %msg, "Document rendering failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "E9003", msg.clone())
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = ErrorBody {
            code: code.to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => Self::NotFound(msg),
            RepoError::Duplicate(msg) => Self::Conflict(msg),
            RepoError::Validation(msg) => Self::Validation(msg),
            RepoError::Database(msg) => Self::Database(msg),
        }
    }
}

impl From<DocumentError> for AppError {
    fn from(err: DocumentError) -> Self {
        Self::Document(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Result type for API handlers
pub type AppResult<T> = Result<T, AppError>;
