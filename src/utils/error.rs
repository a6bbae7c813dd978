//! Error Handling Utilities
//!
//! Application-wide error taxonomy and HTTP translation. Every handler
//! returns `AppResult<T>`; errors surface as the uniform response envelope
//! with `success: false`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

/// Main application error type covering every failure class in the service
#[derive(Error, Debug)]
pub enum AppError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Malformed or missing input fields
    #[error("Validation error: {0}")]
    Validation(String),

    /// Field-level validation failures from request payloads
    #[error("Validation failed")]
    FieldValidation(#[from] ValidationErrors),

    /// Missing, invalid, or expired credentials
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Authenticated but insufficient role
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// Referenced entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// State-transition precondition violated
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Request cap exceeded for the current window
    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    /// Password hashing errors
    #[error("Password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error payload rendered into the uniform response envelope
#[derive(Serialize, Debug)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            errors: None,
        }
    }

    pub fn with_errors(message: &str, errors: serde_json::Value) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            errors: Some(errors),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Database(e) => {
                log::error!("database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("A database error occurred"),
                )
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(&msg)),
            AppError::FieldValidation(errors) => {
                let details =
                    serde_json::to_value(&errors).unwrap_or(serde_json::Value::Null);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::with_errors("Validation failed", details),
                )
            }
            AppError::Authentication(msg) => (StatusCode::UNAUTHORIZED, ErrorResponse::new(&msg)),
            AppError::Authorization(msg) => (StatusCode::FORBIDDEN, ErrorResponse::new(&msg)),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse::new(&msg)),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, ErrorResponse::new(&msg)),
            AppError::RateLimit(msg) => (StatusCode::TOO_MANY_REQUESTS, ErrorResponse::new(&msg)),
            AppError::Hashing(e) => {
                log::error!("password hashing error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("An internal server error occurred"),
                )
            }
            AppError::Configuration(e) => {
                log::error!("configuration error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Server configuration error"),
                )
            }
            AppError::Internal(e) => {
                log::error!("internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("An internal server error occurred"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for operations that can return AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_creation() {
        let body = ErrorResponse::new("Customer not found");
        assert!(!body.success);
        assert_eq!(body.message, "Customer not found");
        assert!(body.errors.is_none());
    }

    #[test]
    fn error_response_with_field_errors() {
        let details = serde_json::json!({"email": ["Invalid email format"]});
        let body = ErrorResponse::with_errors("Validation failed", details.clone());
        assert!(!body.success);
        assert_eq!(body.errors, Some(details));
    }

    #[test]
    fn app_error_display() {
        let err = AppError::Conflict("Device is already verified".to_string());
        assert_eq!(err.to_string(), "Conflict: Device is already verified");
    }

    #[test]
    fn envelope_serializes_without_null_errors() {
        let body = ErrorResponse::new("No token provided");
        let json = serde_json::to_string(&body).unwrap();
        assert!(!json.contains("errors"));
        assert!(json.contains("\"success\":false"));
    }
}
