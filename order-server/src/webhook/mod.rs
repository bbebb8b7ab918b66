//! Payment webhook reconciliation
//!
//! The payment processor notifies us of payment outcomes
//! asynchronously. Events arrive signed (see [`signature`]) and may be
//! redelivered; applying one is idempotent.

pub mod signature;

use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use shared::models::{Order, PaymentStatus};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ServiceResult;
use crate::orders;

/// Payment event payload, parsed from the verified webhook body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentWebhookPayload {
    pub order_id: Uuid,
    pub payment_status: PaymentStatus,
}

impl PaymentWebhookPayload {
    /// Checks beyond what deserialization enforces: the processor only
    /// ever reports an outcome, never a reset to `unpaid`.
    pub fn validate(&self) -> AppResult<()> {
        if self.order_id.is_nil() {
            return Err(AppError::invalid_payload("order_id must not be the nil UUID"));
        }
        if !matches!(
            self.payment_status,
            PaymentStatus::Paid | PaymentStatus::Failed
        ) {
            return Err(AppError::invalid_payload(format!(
                "Invalid payment status '{}': expected 'paid' or 'failed'",
                self.payment_status
            )));
        }
        Ok(())
    }
}

/// Apply a verified payment event to the order it references.
pub async fn process_payment_event(
    pool: &PgPool,
    payload: &PaymentWebhookPayload,
) -> ServiceResult<Order> {
    payload.validate()?;

    let order =
        orders::update_payment_status(pool, payload.order_id, payload.payment_status).await?;

    tracing::info!(
        order_id = %order.id,
        payment_status = %order.payment_status,
        "Payment event reconciled"
    );

    Ok(order)
}
