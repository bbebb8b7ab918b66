#![feature(int_roundings)]
//! Shared types for the order-management backend
//!
//! Domain models (products, orders, order lines), the unified error
//! system, and pagination types used by the service crate.

pub mod error;
pub mod models;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};
