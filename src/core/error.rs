//! Typed error handling for the tours API
//!
//! Three failure families exist in this system:
//!
//! - schema validation errors — field-level, enumerable, surfaced to the
//!   caller as 422 with every failing field listed;
//! - storage-layer errors — uniqueness violations (mapped to a distinct
//!   409) and driver failures (500);
//! - configuration errors — startup-fatal, they never reach an HTTP
//!   response.
//!
//! There is no retry logic anywhere: every failure is a single-attempt,
//! immediately-reported outcome.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// A single field validation failure with its fixed message.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// The main error type for tour operations
#[derive(Debug, Error)]
pub enum ApiError {
    /// One or more fields failed schema validation
    #[error("Invalid tour data: {}", format_field_errors(.0))]
    Validation(Vec<FieldError>),

    /// Unique-index violation on `name`
    #[error("A tour named '{name}' already exists")]
    DuplicateName { name: String },

    /// Tour does not exist (or is hidden from reads)
    #[error("Tour with id '{id}' not found")]
    NotFound { id: Uuid },

    /// Stored document could not be decoded into a tour
    #[error("Failed to decode stored tour: {0}")]
    Serialization(String),

    /// MongoDB driver failure
    #[error("Storage error: {0}")]
    Storage(#[from] mongodb::error::Error),
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::DuplicateName { .. } => StatusCode::CONFLICT,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::DuplicateName { .. } => "DUPLICATE_NAME",
            ApiError::NotFound { .. } => "TOUR_NOT_FOUND",
            ApiError::Serialization(_) => "SERIALIZATION_ERROR",
            ApiError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Convert to an error response body
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::Validation(errors) => Some(serde_json::json!({ "fields": errors })),
            ApiError::DuplicateName { name } => Some(serde_json::json!({ "name": name })),
            ApiError::NotFound { id } => Some(serde_json::json!({ "id": id.to_string() })),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

/// Errors related to environment configuration
///
/// These are fatal at startup and never reach an HTTP response.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable '{name}'")]
    MissingVar { name: &'static str },

    #[error("Invalid value '{value}' for environment variable '{name}'")]
    InvalidValue { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_enumerates_every_field() {
        let err = ApiError::Validation(vec![
            FieldError::new("name", "A tour must have a name"),
            FieldError::new("price", "A tour must have a price"),
        ]);
        let display = err.to_string();
        assert!(display.contains("name: A tour must have a name"));
        assert!(display.contains("price: A tour must have a price"));
    }

    #[test]
    fn validation_error_maps_to_422() {
        let err = ApiError::Validation(vec![FieldError::new("name", "required")]);
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn duplicate_name_maps_to_conflict() {
        let err = ApiError::DuplicateName {
            name: "The Forest Hiker".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.error_code(), "DUPLICATE_NAME");
        assert!(err.to_string().contains("The Forest Hiker"));
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = ApiError::NotFound { id: Uuid::nil() };
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), "TOUR_NOT_FOUND");
    }

    #[test]
    fn validation_details_carry_field_list() {
        let err = ApiError::Validation(vec![FieldError::new("difficulty", "bad")]);
        let response = err.to_response();
        assert_eq!(response.code, "VALIDATION_ERROR");
        let details = response.details.expect("details should be present");
        assert_eq!(details["fields"][0]["field"], "difficulty");
        assert_eq!(details["fields"][0]["message"], "bad");
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::MissingVar { name: "DATABASE" };
        assert!(err.to_string().contains("DATABASE"));
    }
}
