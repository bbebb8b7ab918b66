//! Product Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Unit price, always > 0
    pub price: Decimal,
    /// Available stock, never negative
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
}

impl ProductCreate {
    pub fn validate(&self) -> AppResult<()> {
        validate_name(&self.name)?;
        if self.price <= Decimal::ZERO {
            return Err(AppError::validation("Price must be greater than 0"));
        }
        if self.quantity < 0 {
            return Err(AppError::validation("Quantity must not be negative"));
        }
        Ok(())
    }
}

/// Update product payload (partial, only provided fields are applied)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<i32>,
}

impl ProductUpdate {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(price) = self.price
            && price <= Decimal::ZERO
        {
            return Err(AppError::validation("Price must be greater than 0"));
        }
        if let Some(quantity) = self.quantity
            && quantity < 0
        {
            return Err(AppError::validation("Quantity must not be negative"));
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::validation("Product name must not be empty"));
    }
    if name.chars().count() > 255 {
        return Err(AppError::validation(
            "Product name must be at most 255 characters",
        ));
    }
    Ok(())
}
