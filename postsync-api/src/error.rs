/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers return `Result<T, ApiError>` which converts to the
/// appropriate status code and a JSON body:
///
/// ```json
/// { "error": "conflict", "message": "User already imported" }
/// ```
///
/// Workflow errors map as follows:
///
/// | `SyncError`           | Status |
/// |-----------------------|--------|
/// | `ConstraintViolation` | 409    |
/// | `NotFound`            | 404    |
/// | `Remote`, `Parse`     | 502    |
/// | `Store`, `Export`     | 500    |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use postsync_shared::error::SyncError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),

    /// Not found (404)
    NotFound(String),

    /// Conflict (409), the record is already imported
    Conflict(String),

    /// Unprocessable entity (422) - validation errors
    ValidationError(Vec<ValidationErrorDetail>),

    /// Bad gateway (502), the remote catalog failed
    BadGateway(String),

    /// Internal server error (500)
    InternalError(String),
}

/// Validation error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "conflict", "bad_gateway")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::BadGateway(msg) => write!(f, "Bad gateway: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::ValidationError(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                "Request validation failed".to_string(),
                Some(errors),
            ),
            ApiError::BadGateway(msg) => {
                tracing::warn!("Remote source failure: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "bad_gateway",
                    "The remote data source is unavailable".to_string(),
                    None,
                )
            }
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Convert workflow errors to API errors
impl From<SyncError> for ApiError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::ConstraintViolation(_) => ApiError::Conflict("User already imported".to_string()),
            SyncError::NotFound(msg) => ApiError::NotFound(msg),
            SyncError::Remote(msg) => ApiError::BadGateway(msg),
            SyncError::Parse(msg) => ApiError::BadGateway(format!("Malformed remote record: {}", msg)),
            SyncError::Store(msg) => ApiError::InternalError(format!("Store error: {}", msg)),
            SyncError::Export(msg) => ApiError::InternalError(format!("Export error: {}", msg)),
        }
    }
}

/// Convert request validation failures to API errors
impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        let errors: Vec<ValidationErrorDetail> = err
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();

        ApiError::ValidationError(errors)
    }
}
