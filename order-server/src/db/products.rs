//! Product catalog persistence

use shared::models::{Product, ProductCreate, ProductUpdate};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub async fn create(pool: &PgPool, data: &ProductCreate) -> Result<Product, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO products (name, description, price, quantity)
         VALUES ($1, $2, $3, $4)
         RETURNING *",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(data.quantity)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Lock the given products for the duration of the caller's transaction.
///
/// Rows are locked in id order so that concurrent order creations
/// touching overlapping product sets cannot deadlock.
pub async fn find_for_update(
    conn: &mut PgConnection,
    ids: &[Uuid],
) -> Result<Vec<Product>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM products
         WHERE id = ANY($1)
         ORDER BY id
         FOR UPDATE",
    )
    .bind(ids)
    .fetch_all(conn)
    .await
}

/// List products, newest first, with an optional stock filter.
///
/// Returns the page of products and the total count before pagination.
pub async fn list(
    pool: &PgPool,
    limit: i64,
    offset: i64,
    in_stock: Option<bool>,
) -> Result<(Vec<Product>, i64), sqlx::Error> {
    let filter = match in_stock {
        None => "",
        Some(true) => " WHERE quantity > 0",
        Some(false) => " WHERE quantity = 0",
    };

    let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM products{filter}"))
        .fetch_one(pool)
        .await?;

    let products = sqlx::query_as(&format!(
        "SELECT * FROM products{filter}
         ORDER BY created_at DESC, id
         LIMIT $1 OFFSET $2"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok((products, total))
}

/// Partial update: absent fields keep their current value.
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    data: &ProductUpdate,
) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE products
         SET name = COALESCE($2, name),
             description = COALESCE($3, description),
             price = COALESCE($4, price),
             quantity = COALESCE($5, quantity),
             updated_at = now()
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(data.quantity)
    .fetch_optional(pool)
    .await
}

/// Returns `false` when no product with this id exists. A foreign key
/// violation bubbles up as `sqlx::Error` for the caller to classify.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Conditionally deduct stock. Returns `false` when the product has
/// less than `quantity` in stock (no row matches, nothing changes).
pub async fn deduct_quantity(
    conn: &mut PgConnection,
    id: Uuid,
    quantity: i32,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE products
         SET quantity = quantity - $2, updated_at = now()
         WHERE id = $1 AND quantity >= $2",
    )
    .bind(id)
    .bind(quantity)
    .execute(conn)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Return stock to the catalog. Returns `false` when the product no
/// longer exists (deleted since the order was placed); callers treat
/// that as a skip, not an error.
pub async fn restore_quantity(
    conn: &mut PgConnection,
    id: Uuid,
    quantity: i32,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE products
         SET quantity = quantity + $2, updated_at = now()
         WHERE id = $1",
    )
    .bind(id)
    .bind(quantity)
    .execute(conn)
    .await?;
    Ok(result.rows_affected() > 0)
}
