//! Order management and inventory backend
//!
//! Core capabilities:
//! - Product catalog with stock levels (`db::products`, `api::products`)
//! - Atomic order creation with inventory deduction (`orders`)
//! - Order status lifecycle enforcement (`orders`, `shared::models`)
//! - Authenticated payment webhook reconciliation (`webhook`)

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod orders;
pub mod state;
pub mod webhook;

pub use config::Config;
pub use error::{ServiceError, ServiceResult};
pub use state::AppState;
