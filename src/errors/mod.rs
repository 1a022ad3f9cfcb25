//! Error handling module for the EduConsult backend.
//!
//! Provides centralized error types with mapping to HTTP status codes and
//! the `{success, message, errors}` response envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// A single field-level validation violation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Request body failed a domain's field rules
    Validation(Vec<FieldViolation>),
    /// Missing or invalid auth token
    Unauthorized(String),
    /// Valid token, insufficient role
    Forbidden(String),
    /// Resource not found
    NotFound(String),
    /// Duplicate unique field or violated business rule
    Conflict { field: String, message: String },
    /// Malformed request
    BadRequest(String),
    /// Database error
    Database(String),
    /// Internal server error
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            // Duplicate-key conflicts surface as 400 with a field message
            AppError::Conflict { .. } => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the user-facing error message.
    pub fn message(&self) -> String {
        match self {
            AppError::Validation(_) => "Validation failed".to_string(),
            AppError::Unauthorized(msg) => msg.clone(),
            AppError::Forbidden(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Conflict { message, .. } => message.clone(),
            AppError::BadRequest(msg) => msg.clone(),
            // Internals are logged, never serialized to the caller
            AppError::Database(_) | AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    /// Field-level details included in the envelope, if any.
    pub fn violations(&self) -> Option<Vec<FieldViolation>> {
        match self {
            AppError::Validation(violations) => Some(violations.clone()),
            AppError::Conflict { field, message } => {
                Some(vec![FieldViolation::new(field.clone(), message.clone())])
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Validation(violations) => {
                write!(f, "validation failed ({} violations)", violations.len())
            }
            AppError::Database(msg) | AppError::Internal(msg) => write!(f, "{}", msg),
            _ => write!(f, "{}", self.message()),
        }
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        // SQLite reports unique-index violations as
        // "UNIQUE constraint failed: <table>.<column>"
        if let Some(db_err) = err.as_database_error() {
            let msg = db_err.message();
            if msg.contains("UNIQUE constraint failed") {
                let field = msg.rsplit('.').next().unwrap_or("field").trim().to_string();
                return AppError::Conflict {
                    message: format!("A record with this {} already exists", field),
                    field,
                };
            }
        }
        tracing::error!("Database error: {:?}", err);
        AppError::Database(format!("Database error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::BadRequest(format!("Invalid request body: {}", err))
    }
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldViolation>>,
}

impl ErrorResponse {
    pub fn new(error: &AppError) -> Self {
        Self {
            success: false,
            message: error.message(),
            errors: error.violations(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, AppError::Database(_) | AppError::Internal(_)) {
            tracing::error!("Request failed: {}", self);
        }
        let status = self.status_code();
        let body = ErrorResponse::new(&self);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_maps_to_bad_request_with_field() {
        let err = AppError::Conflict {
            field: "slug".to_string(),
            message: "A record with this slug already exists".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let violations = err.violations().unwrap();
        assert_eq!(violations[0].field, "slug");
    }

    #[test]
    fn internal_errors_hide_details() {
        let err = AppError::Database("connection reset".to_string());
        assert_eq!(err.message(), "Internal server error");
        assert!(err.violations().is_none());
    }

    #[test]
    fn validation_lists_every_violation() {
        let err = AppError::Validation(vec![
            FieldViolation::new("name", "name is required"),
            FieldViolation::new("email", "email must be a valid email address"),
        ]);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.violations().unwrap().len(), 2);
    }
}
