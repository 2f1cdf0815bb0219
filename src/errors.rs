// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for the record layer and the HTTP surface

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Failures raised while rehydrating a persisted record
/// DOCUMENTATION: Missing sub-fields are defaulted, so the only hard failure
/// is a record that is not there at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Missing record: expected a {0} object")]
    MissingRecord(&'static str),
}

/// Application-specific error types
/// DOCUMENTATION: Each variant maps to an HTTP status code and a JSON error body
#[derive(Error, Debug)]
pub enum PlacesError {
    #[error("Place not found with id: {0}")]
    NotFound(String),

    #[error("Place already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(#[from] RecordError),

    #[error("External API error: {0}")]
    ExternalApiError(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Service temporarily unavailable: {0}")]
    ServiceUnavailable(String),
}

impl PlacesError {
    fn code(&self) -> &'static str {
        match self {
            PlacesError::NotFound(_) => "NOT_FOUND",
            PlacesError::AlreadyExists(_) => "ALREADY_EXISTS",
            PlacesError::InvalidInput(_) => "INVALID_INPUT",
            PlacesError::ValidationError(_) => "VALIDATION_ERROR",
            PlacesError::InvalidRecord(_) => "INVALID_RECORD",
            PlacesError::ExternalApiError(_) => "EXTERNAL_API_ERROR",
            PlacesError::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            PlacesError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }
}

/// Convert PlacesError to HTTP response
impl ResponseError for PlacesError {
    fn error_response(&self) -> HttpResponse {
        let body = json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        });

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            PlacesError::NotFound(_) => StatusCode::NOT_FOUND,
            PlacesError::AlreadyExists(_) => StatusCode::CONFLICT,
            PlacesError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            PlacesError::ValidationError(_) => StatusCode::BAD_REQUEST,
            PlacesError::InvalidRecord(_) => StatusCode::UNPROCESSABLE_ENTITY,
            PlacesError::ExternalApiError(_) => StatusCode::BAD_GATEWAY,
            PlacesError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            PlacesError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}
