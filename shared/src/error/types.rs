//! Error types and API response structures

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// The primary error type for the backend, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details for debugging
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Create a webhook signature error
    pub fn signature_invalid(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::SignatureInvalid, msg)
    }

    /// Create an invalid status transition error
    pub fn invalid_transition(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidTransition, msg)
    }

    /// Create an invalid order state error
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidState, msg)
    }

    /// Create an invalid webhook payload error
    pub fn invalid_payload(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidPayload, msg)
    }

    /// Create an insufficient stock error
    pub fn insufficient_stock(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InsufficientStock, msg)
    }

    /// Create a product referenced error
    pub fn product_referenced(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ProductReferenced, msg)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }
}

/// Error response body
///
/// Successful endpoints return their payload directly; failures share
/// this envelope:
/// - `code`: numeric [`ErrorCode`] value
/// - `message`: human-readable message
/// - `details`: additional structured context, when present
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Numeric error code
    pub code: u16,
    /// Human-readable message
    pub message: String,
    /// Additional error details (field-level errors, context, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl ApiResponse {
    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            code: err.code.code(),
            message: err.message.clone(),
            details: err.details.clone(),
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ApiResponse::error(&self);

        if status.is_server_error() {
            tracing::error!(
                code = self.code.code(),
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::NotFound);
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Resource not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::validation("Missing required fields")
            .with_detail("field", "name")
            .with_detail("reason", "required");

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "name");
        assert_eq!(details.get("reason").unwrap(), "required");
    }

    #[test]
    fn test_app_error_http_status() {
        assert_eq!(
            AppError::new(ErrorCode::NotFound).http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::new(ErrorCode::SignatureInvalid).http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::new(ErrorCode::InsufficientStock).http_status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_app_error_convenience_constructors() {
        let err = AppError::not_found("Order");
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Order not found");
        assert!(err.details.as_ref().unwrap().contains_key("resource"));

        let err = AppError::insufficient_stock("Insufficient stock for product 'Widget'");
        assert_eq!(err.code, ErrorCode::InsufficientStock);

        let err = AppError::signature_invalid("Invalid signature");
        assert_eq!(err.code, ErrorCode::SignatureInvalid);
    }

    #[test]
    fn test_api_response_error_shape() {
        let err = AppError::new(ErrorCode::InvalidPayload);
        let resp = ApiResponse::error(&err);
        assert_eq!(resp.code, 5001);
        assert_eq!(resp.message, "Invalid webhook payload");
        assert!(resp.details.is_none());
    }
}
