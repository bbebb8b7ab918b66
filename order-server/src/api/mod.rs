//! HTTP API
//!
//! Route table:
//! - `GET  /health`
//! - `POST /products`, `GET /products`
//! - `GET/PUT/DELETE /products/{id}`
//! - `POST /orders`, `GET /orders`
//! - `GET  /orders/{id}`
//! - `PUT  /orders/{id}/status`
//! - `POST /payment-webhook`

pub mod health;
pub mod orders;
pub mod products;
pub mod webhook;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let catalog = Router::new()
        .route("/products", post(products::create).get(products::list))
        .route(
            "/products/{id}",
            get(products::get_by_id)
                .put(products::update)
                .delete(products::delete),
        );

    let orders = Router::new()
        .route("/orders", post(orders::create).get(orders::list))
        .route("/orders/{id}", get(orders::get_by_id))
        .route("/orders/{id}/status", put(orders::update_status));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(catalog)
        .merge(orders)
        .route("/payment-webhook", post(webhook::payment_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
