//! Order persistence

use rust_decimal::Decimal;
use shared::models::{Order, OrderLine, OrderStatus, PaymentStatus};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::orders::DraftLine;

pub async fn insert(
    conn: &mut PgConnection,
    customer_id: i32,
    total_price: Decimal,
) -> Result<Order, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO orders (customer_id, total_price, status, payment_status)
         VALUES ($1, $2, $3, $4)
         RETURNING *",
    )
    .bind(customer_id)
    .bind(total_price)
    .bind(OrderStatus::Pending)
    .bind(PaymentStatus::Unpaid)
    .fetch_one(conn)
    .await
}

/// Bulk insert order lines via UNNEST, one round trip.
pub async fn insert_lines(
    conn: &mut PgConnection,
    order_id: Uuid,
    lines: &[DraftLine],
) -> Result<(), sqlx::Error> {
    let product_ids: Vec<Uuid> = lines.iter().map(|l| l.product_id).collect();
    let quantities: Vec<i32> = lines.iter().map(|l| l.quantity).collect();
    let prices: Vec<Decimal> = lines.iter().map(|l| l.price_at_purchase).collect();

    sqlx::query(
        "INSERT INTO order_lines (order_id, product_id, quantity, price_at_purchase)
         SELECT $1, u.* FROM UNNEST($2::uuid[], $3::int4[], $4::numeric[]) AS u",
    )
    .bind(order_id)
    .bind(&product_ids)
    .bind(&quantities)
    .bind(&prices)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM orders WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Lock one order row for the duration of the caller's transaction.
pub async fn find_by_id_for_update(
    conn: &mut PgConnection,
    id: Uuid,
) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM orders WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(conn)
        .await
}

/// List orders, newest first, with optional status filters.
///
/// Returns the page of orders and the total count before pagination.
pub async fn list(
    pool: &PgPool,
    limit: i64,
    offset: i64,
    status: Option<OrderStatus>,
    payment_status: Option<PaymentStatus>,
) -> Result<(Vec<Order>, i64), sqlx::Error> {
    let status = status.map(|s| s.as_str());
    let payment_status = payment_status.map(|s| s.as_str());

    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM orders
         WHERE ($1::text IS NULL OR status = $1)
           AND ($2::text IS NULL OR payment_status = $2)",
    )
    .bind(status)
    .bind(payment_status)
    .fetch_one(pool)
    .await?;

    let orders = sqlx::query_as(
        "SELECT * FROM orders
         WHERE ($1::text IS NULL OR status = $1)
           AND ($2::text IS NULL OR payment_status = $2)
         ORDER BY created_at DESC, id
         LIMIT $3 OFFSET $4",
    )
    .bind(status)
    .bind(payment_status)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok((orders, total))
}

/// Lines for one order, in insertion order.
pub async fn lines_for_order<'e, E>(executor: E, order_id: Uuid) -> Result<Vec<OrderLine>, sqlx::Error>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query_as("SELECT * FROM order_lines WHERE order_id = $1 ORDER BY id")
        .bind(order_id)
        .fetch_all(executor)
        .await
}

/// Lines for a batch of orders, grouped by the caller.
pub async fn lines_for_orders(
    pool: &PgPool,
    order_ids: &[Uuid],
) -> Result<Vec<OrderLine>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM order_lines WHERE order_id = ANY($1) ORDER BY id")
        .bind(order_ids)
        .fetch_all(pool)
        .await
}

pub async fn update_status(
    conn: &mut PgConnection,
    id: Uuid,
    status: OrderStatus,
) -> Result<Order, sqlx::Error> {
    sqlx::query_as(
        "UPDATE orders SET status = $2, updated_at = now()
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(status)
    .fetch_one(conn)
    .await
}

pub async fn update_payment_status(
    conn: &mut PgConnection,
    id: Uuid,
    payment_status: PaymentStatus,
) -> Result<Order, sqlx::Error> {
    sqlx::query_as(
        "UPDATE orders SET payment_status = $2, updated_at = now()
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(payment_status)
    .fetch_one(conn)
    .await
}
