//! Order transaction engine
//!
//! Creates orders with atomic inventory deduction and drives the
//! order status lifecycle. Every mutation runs inside a single
//! transaction: either the order, its lines and all stock changes
//! land together, or nothing does.

mod plan;

pub use plan::{plan_order, DraftLine, OrderDraft};

use std::collections::{HashMap, HashSet};

use shared::error::AppError;
use shared::models::{
    Order, OrderCreateRequest, OrderLine, OrderStatus, OrderWithLines, PaymentStatus, Product,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::error::ServiceResult;

/// Create an order, snapshotting prices and deducting stock atomically.
///
/// The referenced products are locked with `SELECT ... FOR UPDATE` so
/// concurrent orders for the same products serialize; the conditional
/// decrement then guarantees stock never goes negative even across
/// duplicate lines for the same product.
pub async fn create_order(
    pool: &PgPool,
    req: &OrderCreateRequest,
) -> ServiceResult<OrderWithLines> {
    let mut tx = pool.begin().await?;

    let mut ids: Vec<Uuid> = Vec::new();
    let mut seen = HashSet::new();
    for line in &req.lines {
        if seen.insert(line.product_id) {
            ids.push(line.product_id);
        }
    }

    let products = db::products::find_for_update(&mut tx, &ids).await?;
    let products: HashMap<Uuid, Product> =
        products.into_iter().map(|p| (p.id, p)).collect();

    let draft = plan_order(&req.lines, &products)?;

    let order = db::orders::insert(&mut tx, req.customer_id, draft.total_price).await?;
    db::orders::insert_lines(&mut tx, order.id, &draft.lines).await?;

    for line in &draft.lines {
        let deducted =
            db::products::deduct_quantity(&mut tx, line.product_id, line.quantity).await?;
        if !deducted {
            // The locked read saw enough stock per line, so this only
            // fires when the same product appears on several lines and
            // their combined quantity overdraws it.
            let name = products
                .get(&line.product_id)
                .map(|p| p.name.as_str())
                .unwrap_or("unknown");
            return Err(AppError::insufficient_stock(format!(
                "Insufficient stock for product '{name}' across order lines"
            ))
            .with_detail("product_id", line.product_id.to_string())
            .into());
        }
    }

    let lines = db::orders::lines_for_order(&mut *tx, order.id).await?;
    tx.commit().await?;

    tracing::info!(
        order_id = %order.id,
        customer_id = order.customer_id,
        total_price = %order.total_price,
        "Order created"
    );

    Ok(OrderWithLines { order, lines })
}

pub async fn get_order(pool: &PgPool, id: Uuid) -> ServiceResult<Option<OrderWithLines>> {
    let Some(order) = db::orders::find_by_id(pool, id).await? else {
        return Ok(None);
    };
    let lines = db::orders::lines_for_order(pool, id).await?;
    Ok(Some(OrderWithLines { order, lines }))
}

pub async fn list_orders(
    pool: &PgPool,
    limit: i64,
    offset: i64,
    status: Option<OrderStatus>,
    payment_status: Option<PaymentStatus>,
) -> ServiceResult<(Vec<OrderWithLines>, i64)> {
    let (orders, total) = db::orders::list(pool, limit, offset, status, payment_status).await?;

    let ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
    let mut lines_by_order: HashMap<Uuid, Vec<OrderLine>> = HashMap::new();
    for line in db::orders::lines_for_orders(pool, &ids).await? {
        lines_by_order.entry(line.order_id).or_default().push(line);
    }

    let items = orders
        .into_iter()
        .map(|order| {
            let lines = lines_by_order.remove(&order.id).unwrap_or_default();
            OrderWithLines { order, lines }
        })
        .collect();

    Ok((items, total))
}

/// Drive the order status state machine.
///
/// Cancelling a pending order restores its stock; products deleted
/// from the catalog in the meantime are skipped. A same-to-same
/// transition commits nothing and returns the order unchanged.
pub async fn update_order_status(
    pool: &PgPool,
    order_id: Uuid,
    new_status: OrderStatus,
) -> ServiceResult<OrderWithLines> {
    let mut tx = pool.begin().await?;

    let Some(order) = db::orders::find_by_id_for_update(&mut tx, order_id).await? else {
        return Err(AppError::not_found("Order").into());
    };

    if !order.status.can_transition_to(new_status) {
        return Err(AppError::invalid_transition(format!(
            "Cannot transition order status from '{}' to '{}'",
            order.status, new_status
        ))
        .with_detail("current_status", order.status.as_str())
        .with_detail("requested_status", new_status.as_str())
        .into());
    }

    let lines = db::orders::lines_for_order(&mut *tx, order_id).await?;

    if order.status == new_status {
        return Ok(OrderWithLines { order, lines });
    }

    if new_status == OrderStatus::Canceled {
        // The transition check only admits this from Pending, where
        // stock was deducted at creation and must come back.
        for line in &lines {
            let restored =
                db::products::restore_quantity(&mut tx, line.product_id, line.quantity).await?;
            if !restored {
                tracing::warn!(
                    order_id = %order_id,
                    product_id = %line.product_id,
                    "Product deleted since order creation, skipping stock restoration"
                );
            }
        }
    }

    let updated = db::orders::update_status(&mut tx, order_id, new_status).await?;
    tx.commit().await?;

    tracing::info!(
        order_id = %order_id,
        from = %order.status,
        to = %new_status,
        "Order status updated"
    );

    Ok(OrderWithLines {
        order: updated,
        lines,
    })
}

/// Apply a payment outcome to an order.
///
/// Payment status only moves while the order is `Pending`: once the
/// order reaches a terminal status the processor's events are stale
/// and rejected. While pending, re-asserting the current status is a
/// no-op and a `Paid` order is otherwise frozen.
pub async fn update_payment_status(
    pool: &PgPool,
    order_id: Uuid,
    new_payment_status: PaymentStatus,
) -> ServiceResult<Order> {
    let mut tx = pool.begin().await?;

    let Some(order) = db::orders::find_by_id_for_update(&mut tx, order_id).await? else {
        return Err(AppError::not_found("Order").into());
    };

    if order.status != OrderStatus::Pending {
        return Err(AppError::invalid_state(format!(
            "Cannot update payment status for order with status '{}'",
            order.status
        ))
        .with_detail("order_status", order.status.as_str())
        .into());
    }

    if order.payment_status == new_payment_status {
        return Ok(order);
    }

    if order.payment_status == PaymentStatus::Paid {
        return Err(AppError::invalid_state(
            "Order is already paid; payment status cannot change",
        )
        .into());
    }

    let updated =
        db::orders::update_payment_status(&mut tx, order_id, new_payment_status).await?;
    tx.commit().await?;

    tracing::info!(
        order_id = %order_id,
        from = %order.payment_status,
        to = %new_payment_status,
        "Payment status updated"
    );

    Ok(updated)
}
