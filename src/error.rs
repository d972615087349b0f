//! Error types for the Kadro server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::envelope::ApiResponse;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        errors: Vec<String>,
    },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Single-message validation error
    pub fn validation(message: impl Into<String>) -> Self {
        let message = message.into();
        AppError::Validation {
            errors: vec![message.clone()],
            message,
        }
    }

    /// Validation error carrying field-level detail
    pub fn validation_errors(message: impl Into<String>, errors: Vec<String>) -> Self {
        AppError::Validation {
            message: message.into(),
            errors,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::Authentication(msg) => (StatusCode::UNAUTHORIZED, msg, Vec::new()),
            AppError::Authorization(msg) => (StatusCode::FORBIDDEN, msg, Vec::new()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, Vec::new()),
            AppError::Validation { message, errors } => {
                (StatusCode::BAD_REQUEST, message, errors)
            }
            AppError::InvalidState(msg) => (StatusCode::CONFLICT, msg, Vec::new()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg, Vec::new()),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Storage is temporarily unavailable".to_string(),
                    Vec::new(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    Vec::new(),
                )
            }
        };

        let body = Json(ApiResponse::<()>::fail(message, errors));

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

/// Map unique-constraint violations to a conflict error, everything else to
/// the generic database error.
pub fn map_unique_violation(e: sqlx::Error, message: &str) -> AppError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.code().as_deref() == Some("23505") {
            return AppError::Conflict(message.to_string());
        }
    }
    AppError::Database(e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_helper_carries_message_in_errors() {
        let err = AppError::validation("email is required");
        match err {
            AppError::Validation { message, errors } => {
                assert_eq!(message, "email is required");
                assert_eq!(errors, vec!["email is required".to_string()]);
            }
            _ => panic!("expected validation error"),
        }
    }

    #[test]
    fn validation_errors_keeps_field_detail() {
        let err = AppError::validation_errors(
            "Request validation failed",
            vec!["item 3 not found".into(), "quantity must be >= 1".into()],
        );
        match err {
            AppError::Validation { errors, .. } => assert_eq!(errors.len(), 2),
            _ => panic!("expected validation error"),
        }
    }
}
