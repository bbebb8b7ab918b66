//! Pure order planning
//!
//! Resolves an order creation request against a snapshot of the
//! referenced products: existence checks, stock checks, price
//! snapshotting and the order total. No I/O, so the whole planning
//! stage is unit-testable without a database.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde_json::Value;
use shared::error::{AppError, AppResult};
use shared::models::{OrderLineRequest, Product};
use uuid::Uuid;

/// A resolved order line, ready to be persisted
#[derive(Debug, Clone)]
pub struct DraftLine {
    pub product_id: Uuid,
    pub quantity: i32,
    /// Catalog price at planning time
    pub price_at_purchase: Decimal,
}

/// The outcome of planning: line snapshots and the order total
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub total_price: Decimal,
    pub lines: Vec<DraftLine>,
}

/// Plan an order against the given product snapshot.
///
/// Fails with `NotFound` when any referenced product is missing
/// (reporting every missing id at once) and with `InsufficientStock`
/// on the first line whose requested quantity exceeds available stock.
pub fn plan_order(
    lines: &[OrderLineRequest],
    products: &HashMap<Uuid, Product>,
) -> AppResult<OrderDraft> {
    let mut missing: Vec<String> = Vec::new();
    for line in lines {
        if !products.contains_key(&line.product_id) {
            let id = line.product_id.to_string();
            if !missing.contains(&id) {
                missing.push(id);
            }
        }
    }
    if !missing.is_empty() {
        return Err(AppError::with_message(
            shared::error::ErrorCode::NotFound,
            format!("Products not found: {}", missing.join(", ")),
        )
        .with_detail("missing_product_ids", Value::from(missing)));
    }

    for line in lines {
        let Some(product) = products.get(&line.product_id) else {
            continue;
        };
        if product.quantity < line.quantity {
            return Err(AppError::insufficient_stock(format!(
                "Insufficient stock for product '{}'. Available: {}, Requested: {}",
                product.name, product.quantity, line.quantity
            ))
            .with_detail("product_id", line.product_id.to_string())
            .with_detail("available", product.quantity)
            .with_detail("requested", line.quantity));
        }
    }

    let mut total_price = Decimal::ZERO;
    let mut drafts = Vec::with_capacity(lines.len());
    for line in lines {
        let Some(product) = products.get(&line.product_id) else {
            continue;
        };
        total_price += product.price * Decimal::from(line.quantity);
        drafts.push(DraftLine {
            product_id: line.product_id,
            quantity: line.quantity,
            price_at_purchase: product.price,
        });
    }

    Ok(OrderDraft {
        total_price,
        lines: drafts,
    })
}
