//! Order and OrderLine models, plus the order status state machine

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Order lifecycle status
///
/// `Pending` is the initial state; `Completed` and `Canceled` are
/// terminal. The only legal transitions are Pending → Completed and
/// Pending → Canceled. A same-to-same transition is always allowed
/// and treated as a no-op by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(type_name = "text", rename_all = "lowercase"))]
pub enum OrderStatus {
    Pending,
    Completed,
    Canceled,
}

impl OrderStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
            OrderStatus::Canceled => "canceled",
        }
    }

    /// Whether this status has no outgoing transitions (except self)
    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Canceled)
    }

    /// Pure transition check for the order status state machine
    pub fn can_transition_to(&self, new: OrderStatus) -> bool {
        if *self == new {
            // Same-state transition is a no-op, always allowed
            return true;
        }
        if self.is_terminal() {
            return false;
        }
        matches!(new, OrderStatus::Completed | OrderStatus::Canceled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment status of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(type_name = "text", rename_all = "lowercase"))]
pub enum PaymentStatus {
    Unpaid,
    Paid,
    Failed,
}

impl PaymentStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: Uuid,
    /// Opaque reference to an externally managed customer
    pub customer_id: i32,
    /// Computed at creation time from line snapshots, never recomputed
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One line item within an order
///
/// `price_at_purchase` snapshots the product price at order-creation
/// time so later catalog price changes never alter past orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderLine {
    pub id: i64,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub price_at_purchase: Decimal,
}

/// Order together with its lines, in insertion order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithLines {
    #[serde(flatten)]
    pub order: Order,
    pub lines: Vec<OrderLine>,
}

/// One requested line in an order creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineRequest {
    pub product_id: Uuid,
    pub quantity: i32,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreateRequest {
    pub customer_id: i32,
    pub lines: Vec<OrderLineRequest>,
}

impl OrderCreateRequest {
    pub fn validate(&self) -> AppResult<()> {
        if self.customer_id <= 0 {
            return Err(AppError::validation("customer_id must be greater than 0"));
        }
        if self.lines.is_empty() {
            return Err(AppError::validation(
                "Order must contain at least one line",
            ));
        }
        for line in &self.lines {
            if line.quantity <= 0 {
                return Err(AppError::validation(
                    "Line quantity must be greater than 0",
                )
                .with_detail("product_id", line.product_id.to_string()));
            }
        }
        Ok(())
    }
}

/// Update order status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}
