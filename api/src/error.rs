//! Unified error types for the Repair Desk API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Core business logic errors
//! - `FieldValidationError`: Accumulated per-field validation failures
//! - `ZipLookupError`: ZIP code lookup client errors
//! - `AppError`: Application layer errors (wraps domain errors for HTTP responses)

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// A single rejected field and the message shown to the operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Every field that failed validation for one request
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("invalid fields: {}", field_names(.errors))]
pub struct FieldValidationError {
    pub errors: Vec<FieldError>,
}

impl FieldValidationError {
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError {
                field: field.to_string(),
                message: message.into(),
            }],
        }
    }

    /// Message recorded for a field, if any
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

fn field_names(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Domain layer errors - pure business logic errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Fields(#[from] FieldValidationError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Database(e.to_string())
    }
}

/// ZIP code lookup client errors
#[derive(Debug, Error)]
pub enum ZipLookupError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status}")]
    Api { status: u16 },

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("ZIP lookup error: {0}")]
    ZipLookup(#[from] ZipLookupError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<FieldValidationError> for AppError {
    fn from(e: FieldValidationError) -> Self {
        AppError::Domain(DomainError::Fields(e))
    }
}

/// A body that is not JSON, or whose values have the wrong shape
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<Vec<FieldError>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Domain(DomainError::Fields(e)) => {
                let body = Json(ErrorResponse {
                    error: "Validation error".to_string(),
                    details: None,
                    fields: Some(e.errors.clone()),
                });
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::Domain(DomainError::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, "Not found", Some(msg.clone()))
            }
            AppError::Domain(DomainError::Unauthorized(_)) | AppError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "Unauthorized", None)
            }
            AppError::Domain(DomainError::Database(msg)) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::Domain(DomainError::Internal(msg)) | AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::ZipLookup(e) => {
                tracing::error!("ZIP lookup error: {}", e);
                (StatusCode::BAD_GATEWAY, "ZIP lookup unavailable", None)
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Bad request", Some(msg.clone()))
            }
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden", None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not found", Some(msg.clone())),
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
            fields: None,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_validation_error_lists_fields() {
        let err = FieldValidationError {
            errors: vec![
                FieldError {
                    field: "cnpj".to_string(),
                    message: "a".to_string(),
                },
                FieldError {
                    field: "email".to_string(),
                    message: "b".to_string(),
                },
            ],
        };

        assert_eq!(err.to_string(), "invalid fields: cnpj, email");
        assert_eq!(err.message_for("email"), Some("b"));
        assert_eq!(err.message_for("street"), None);
    }

    #[test]
    fn fields_map_to_bad_request() {
        let response = AppError::from(FieldValidationError::single("item", "item cannot be null"))
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn status_codes_for_other_errors() {
        assert_eq!(
            AppError::Forbidden.into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::Domain(DomainError::NotFound("x".into()))
                .into_response()
                .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Domain(DomainError::Database("boom".into()))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::ZipLookup(ZipLookupError::Api { status: 500 })
                .into_response()
                .status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
