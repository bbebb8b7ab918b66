//! Unified error codes for the order-management backend
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 4xxx: Order errors
//! - 5xxx: Webhook/payment errors
//! - 6xxx: Product errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,

    // ==================== 1xxx: Auth ====================
    /// Webhook signature missing or invalid
    SignatureInvalid = 1001,

    // ==================== 4xxx: Order ====================
    /// Requested order status transition is not allowed
    InvalidTransition = 4001,
    /// Order is in a state that forbids the operation
    InvalidState = 4002,

    // ==================== 5xxx: Webhook/Payment ====================
    /// Webhook payload failed validation
    InvalidPayload = 5001,

    // ==================== 6xxx: Product ====================
    /// Not enough stock to satisfy the requested quantity
    InsufficientStock = 6001,
    /// Product is referenced by existing order lines
    ProductReferenced = 6002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::SignatureInvalid => "Webhook signature missing or invalid",
            ErrorCode::InvalidTransition => "Order status transition not allowed",
            ErrorCode::InvalidState => "Operation not allowed in current order state",
            ErrorCode::InvalidPayload => "Invalid webhook payload",
            ErrorCode::InsufficientStock => "Insufficient stock",
            ErrorCode::ProductReferenced => "Product is referenced by existing orders",
            ErrorCode::InternalError => "Internal server error",
        }
    }

    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> http::StatusCode {
        use http::StatusCode;
        match self {
            // 404 Not Found
            Self::NotFound => StatusCode::NOT_FOUND,

            // 401 Unauthorized
            Self::SignatureInvalid => StatusCode::UNAUTHORIZED,

            // 500 Internal Server Error
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation/business errors)
            Self::ValidationFailed
            | Self::InvalidTransition
            | Self::InvalidState
            | Self::InvalidPayload
            | Self::InsufficientStock
            | Self::ProductReferenced => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            1001 => Ok(ErrorCode::SignatureInvalid),
            4001 => Ok(ErrorCode::InvalidTransition),
            4002 => Ok(ErrorCode::InvalidState),
            5001 => Ok(ErrorCode::InvalidPayload),
            6001 => Ok(ErrorCode::InsufficientStock),
            6002 => Ok(ErrorCode::ProductReferenced),
            9001 => Ok(ErrorCode::InternalError),
            other => Err(InvalidErrorCode(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::SignatureInvalid.code(), 1001);
        assert_eq!(ErrorCode::InvalidTransition.code(), 4001);
        assert_eq!(ErrorCode::InvalidState.code(), 4002);
        assert_eq!(ErrorCode::InvalidPayload.code(), 5001);
        assert_eq!(ErrorCode::InsufficientStock.code(), 6001);
        assert_eq!(ErrorCode::ProductReferenced.code(), 6002);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_http_status_mapping() {
        use http::StatusCode;

        assert_eq!(ErrorCode::NotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::SignatureInvalid.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::InternalError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::InsufficientStock.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::InvalidTransition.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::ProductReferenced.http_status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_round_trip_conversion() {
        for code in [
            ErrorCode::ValidationFailed,
            ErrorCode::NotFound,
            ErrorCode::SignatureInvalid,
            ErrorCode::InvalidTransition,
            ErrorCode::InvalidState,
            ErrorCode::InvalidPayload,
            ErrorCode::InsufficientStock,
            ErrorCode::ProductReferenced,
            ErrorCode::InternalError,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
        assert!(ErrorCode::try_from(1234).is_err());
    }
}
