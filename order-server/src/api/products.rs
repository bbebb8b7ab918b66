//! Product catalog endpoints

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use shared::error::AppError;
use shared::models::{Product, ProductCreate, ProductUpdate};
use shared::response::{PageQuery, PaginatedResponse};

use crate::db;
use crate::state::AppState;

fn internal(e: sqlx::Error) -> AppError {
    tracing::error!(error = %e, "Product database error");
    AppError::new(shared::error::ErrorCode::InternalError)
}

/// POST /products
pub async fn create(
    State(state): State<AppState>,
    Json(data): Json<ProductCreate>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    data.validate()?;

    let product = db::products::create(&state.pool, &data)
        .await
        .map_err(internal)?;

    tracing::info!(product_id = %product.id, name = %product.name, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    /// `true` → quantity > 0, `false` → quantity = 0, absent → all
    pub in_stock: Option<bool>,
}

/// GET /products
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<PaginatedResponse<Product>>, AppError> {
    let (page, page_size, offset) = PageQuery {
        page: query.page,
        page_size: query.page_size,
    }
    .resolve()?;

    let (products, total) =
        db::products::list(&state.pool, page_size, offset, query.in_stock)
            .await
            .map_err(internal)?;

    Ok(Json(PaginatedResponse::new(products, total, page, page_size)))
}

/// GET /products/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, AppError> {
    let product = db::products::find_by_id(&state.pool, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::not_found("Product"))?;

    Ok(Json(product))
}

/// PUT /products/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<ProductUpdate>,
) -> Result<Json<Product>, AppError> {
    data.validate()?;

    let product = db::products::update(&state.pool, id, &data)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::not_found("Product"))?;

    tracing::info!(product_id = %product.id, "Product updated");
    Ok(Json(product))
}

/// DELETE /products/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    match db::products::delete(&state.pool, id).await {
        Ok(true) => {
            tracing::info!(product_id = %id, "Product deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(false) => Err(AppError::not_found("Product")),
        Err(e) if db::is_foreign_key_violation(&e) => Err(AppError::product_referenced(
            "Cannot delete a product referenced by existing orders",
        )
        .with_detail("product_id", id.to_string())),
        Err(e) => Err(internal(e)),
    }
}
