//! Unified error handling
//!
//! Application error enum and the API response envelope.
//!
//! # Error code ranges
//!
//! | Prefix | Category | Example |
//! |--------|----------|---------|
//! | E0xxx  | Validation / generic | E0002 validation failed |
//! | E3xxx  | Auth tokens | E3002 invalid token |
//! | E4xxx  | Order workflow | E4001 invalid transition |
//! | E6xxx  | Catalog | E6001 category in use |
//! | E9xxx  | System | E9002 database error |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use shared::cart::CartError;
use shared::order::TransitionError;

use crate::db::repository::RepoError;

/// Unified API response envelope
///
/// ```json
/// { "code": "E0000", "message": "Success", "data": { ... } }
/// ```
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    /// "E0000" means success
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Auth errors (401) ==========
    #[error("Authentication required")]
    Unauthorized,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    /// One message for bad username and bad password alike, so login
    /// probing cannot enumerate accounts
    #[error("Invalid username or password")]
    InvalidCredentials,

    // ========== Business logic errors (4xx) ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource already exists: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Category deletion blocked by menu items still referencing it
    #[error("category '{category}' is referenced by {count} menu item(s)")]
    CategoryInUse { category: String, count: usize },

    /// Attempted out-of-order status change
    #[error("{0}")]
    InvalidTransition(TransitionError),

    // ========== System errors (5xx) ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Invalid request: {0}")]
    Invalid(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, data) = match &self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "E3001",
                "Please login first".to_string(),
                None,
            ),
            AppError::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                "E3003",
                "Token expired".to_string(),
                None,
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "E3002",
                "Invalid token".to_string(),
                None,
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "E3004",
                self.to_string(),
                None,
            ),

            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.clone(), None),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "E0004", msg.clone(), None),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg.clone(), None),

            AppError::CategoryInUse { count, .. } => (
                StatusCode::CONFLICT,
                "E6001",
                self.to_string(),
                Some(json!({ "count": count })),
            ),

            AppError::InvalidTransition(t) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "E4001",
                t.to_string(),
                None,
            ),

            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9002",
                    "Database error, please retry".to_string(),
                    None,
                )
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error".to_string(),
                    None,
                )
            }
            AppError::Invalid(msg) => (StatusCode::BAD_REQUEST, "E0006", msg.clone(), None),
        };

        let body = Json(AppResponse {
            code: code.to_string(),
            message,
            data,
        });

        (status, body).into_response()
    }
}

// ========== Conversions ==========

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl From<CartError> for AppError {
    fn from(e: CartError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<TransitionError> for AppError {
    fn from(e: TransitionError) -> Self {
        AppError::InvalidTransition(e)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string())
    }
}

// ========== Helper constructors ==========

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials
    }
}
