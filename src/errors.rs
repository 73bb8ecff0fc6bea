//! Centralized error handling.
//!
//! Provides a unified error type for the HTTP layer, with automatic
//! conversion into the `{"error": "..."}` response envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::infra::repositories::StorageError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication
    #[error("Authentication required")]
    Unauthorized,

    // Resource errors
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already exists")]
    Conflict(String),

    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    BadRequest(String),

    // External service errors
    #[error("Storage error")]
    Storage(#[from] StorageError),

    #[error("Authentication error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Storage(e) => match e {
                StorageError::NotFound => StatusCode::NOT_FOUND,
                StorageError::UniqueViolation(_) => StatusCode::CONFLICT,
                StorageError::ForeignKeyViolation(_) => StatusCode::BAD_REQUEST,
                StorageError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Storage(StorageError::NotFound) => "record not found".to_string(),
            AppError::Storage(StorageError::UniqueViolation(_)) => {
                "record already exists".to_string()
            }
            AppError::Storage(StorageError::ForeignKeyViolation(_)) => {
                "referenced record does not exist or is still in use".to_string()
            }

            // Hide details for internal/security errors
            AppError::Storage(StorageError::Database(e)) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Jwt(e) => {
                tracing::debug!("JWT error: {:?}", e);
                "Invalid or expired token".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.user_message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn not_found(entity: impl Into<String>) -> Self {
        AppError::NotFound(entity.into())
    }

    pub fn conflict(entity: impl Into<String>) -> Self {
        AppError::Conflict(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Zero rows touched by an update or delete keyed by id
    pub fn no_rows_affected() -> Self {
        AppError::BadRequest("no rows affected".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DbErr;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::not_found("order").status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::validation("bad").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::no_rows_affected().status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::conflict("user").status(), StatusCode::CONFLICT);
        assert_eq!(AppError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_storage_kinds_map_to_status() {
        let cases = [
            (StorageError::NotFound, StatusCode::NOT_FOUND),
            (StorageError::UniqueViolation("login".into()), StatusCode::CONFLICT),
            (StorageError::ForeignKeyViolation("fk".into()), StatusCode::BAD_REQUEST),
            (
                StorageError::Database(DbErr::Custom("down".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status(), status);
        }
    }

    #[test]
    fn test_database_details_hidden() {
        let err = AppError::from(StorageError::Database(DbErr::Custom(
            "password authentication failed".into(),
        )));
        assert_eq!(err.user_message(), "A database error occurred");
    }

    #[test]
    fn test_client_messages_pass_through() {
        assert_eq!(AppError::not_found("order").user_message(), "order not found");
        assert_eq!(AppError::conflict("user").user_message(), "user already exists");
    }
}
