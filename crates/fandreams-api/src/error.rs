//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use fandreams_core::error::{AppError, ErrorKind};

use crate::dto::response::{ApiErrorBody, ApiErrorResponse};
use crate::validation::ValidationFailure;

/// An error ready to be sent to an API client.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{status} {code}: {message}")]
pub struct ApiError {
    /// HTTP status.
    pub status: StatusCode,
    /// Machine-readable error code.
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
    /// Optional structured details.
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Rejection for a body that is not well-formed JSON.
    pub fn invalid_json(rejection: &JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            code: "INVALID_JSON",
            message: rejection.body_text(),
            details: None,
        }
    }

    /// Serializable body of this error.
    pub fn body(&self) -> ApiErrorResponse {
        ApiErrorResponse {
            success: false,
            error: ApiErrorBody {
                code: self.code.to_string(),
                message: self.message.clone(),
                details: self.details.clone(),
            },
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        let status = match err.kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Configuration
            | ErrorKind::Serialization
            | ErrorKind::Io
            | ErrorKind::Internal => {
                tracing::error!(error = %err, "Internal server error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Internal causes stay in the log.
        let message = if status.is_server_error() {
            "Internal server error".to_string()
        } else {
            err.message
        };

        Self {
            status,
            code: err.kind.code(),
            message,
            details: err.details,
        }
    }
}

impl From<ValidationFailure> for ApiError {
    fn from(failure: ValidationFailure) -> Self {
        Self::from(AppError::from(failure))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = self.body();
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let failure = ValidationFailure::single("country", "exact_length", "two letters");
        let err = ApiError::from(failure);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "VALIDATION_ERROR");
        assert_eq!(
            err.body().error.details,
            Some(serde_json::json!({ "country": ["two letters"] }))
        );
    }

    #[test]
    fn test_internal_message_is_hidden() {
        let err = ApiError::from(AppError::internal("pool exhausted at db-2"));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Internal server error");
    }

    #[test]
    fn test_not_found_keeps_message() {
        let err = ApiError::from(AppError::not_found("Unknown package 'pack_42'"));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.body().error.message, "Unknown package 'pack_42'");
    }
}
