//! Unified error system
//!
//! - [`ErrorCode`]: standardized error codes for all error types
//! - [`AppError`]: rich error type with codes, messages, and details
//! - [`ApiResponse`]: shared error response body
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 4xxx: Order errors
//! - 5xxx: Webhook/payment errors
//! - 6xxx: Product errors
//! - 9xxx: System errors

mod codes;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
