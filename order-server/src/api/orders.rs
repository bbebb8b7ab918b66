//! Order endpoints

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use shared::error::AppError;
use shared::models::{
    OrderCreateRequest, OrderStatus, OrderStatusUpdate, OrderWithLines, PaymentStatus,
};
use shared::response::{PageQuery, PaginatedResponse};

use crate::state::AppState;

/// POST /orders
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<OrderCreateRequest>,
) -> Result<(StatusCode, Json<OrderWithLines>), AppError> {
    req.validate()?;

    let order = crate::orders::create_order(&state.pool, &req).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
}

/// GET /orders
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<PaginatedResponse<OrderWithLines>>, AppError> {
    let (page, page_size, offset) = PageQuery {
        page: query.page,
        page_size: query.page_size,
    }
    .resolve()?;

    let (orders, total) = crate::orders::list_orders(
        &state.pool,
        page_size,
        offset,
        query.status,
        query.payment_status,
    )
    .await?;

    Ok(Json(PaginatedResponse::new(orders, total, page, page_size)))
}

/// GET /orders/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderWithLines>, AppError> {
    let order = crate::orders::get_order(&state.pool, id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Order"))?;

    Ok(Json(order))
}

/// PUT /orders/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<OrderStatusUpdate>,
) -> Result<Json<OrderWithLines>, AppError> {
    let order = crate::orders::update_order_status(&state.pool, id, req.status).await?;
    Ok(Json(order))
}
