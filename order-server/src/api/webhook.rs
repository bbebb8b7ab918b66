//! Payment webhook endpoint
//!
//! Takes the raw body so the signature is verified over exactly the
//! bytes the processor signed, before any JSON parsing.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use shared::error::AppError;
use shared::models::PaymentStatus;

use crate::state::AppState;
use crate::webhook::{self, signature, PaymentWebhookPayload};

pub const SIGNATURE_HEADER: &str = "x-signature";

/// Acknowledgment returned once a payment event has been applied
#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub message: String,
    pub order_id: Uuid,
    pub payment_status: PaymentStatus,
}

/// POST /payment-webhook
pub async fn payment_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>, AppError> {
    let provided = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::signature_invalid("Missing X-Signature header"))?;

    if body.is_empty() {
        return Err(AppError::validation("Request body must not be empty"));
    }

    if !signature::verify(&body, provided, state.webhook_secret.as_bytes()) {
        tracing::warn!("Webhook signature verification failed");
        return Err(AppError::signature_invalid("Invalid webhook signature"));
    }

    let payload: PaymentWebhookPayload = serde_json::from_slice(&body)
        .map_err(|e| AppError::invalid_payload(format!("Malformed webhook payload: {e}")))?;

    let order = webhook::process_payment_event(&state.pool, &payload).await?;

    Ok(Json(WebhookAck {
        message: "Payment status updated".to_string(),
        order_id: order.id,
        payment_status: order.payment_status,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    const SECRET: &str = "test_webhook_secret";

    // connect_lazy never opens a connection; these tests only exercise
    // the paths that reject a request before any database access.
    fn test_router() -> axum::Router {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();
        api::create_router(AppState {
            pool,
            webhook_secret: SECRET.to_string(),
        })
    }

    fn webhook_request(body: &str, sig: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/payment-webhook")
            .header("content-type", "application/json");
        if let Some(sig) = sig {
            builder = builder.header("x-signature", sig);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn error_code(response: axum::response::Response) -> u16 {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        json["code"].as_u64().unwrap() as u16
    }

    #[tokio::test]
    async fn test_missing_signature_header_is_unauthorized() {
        let response = test_router()
            .oneshot(webhook_request("{}", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(error_code(response).await, 1001);
    }

    #[tokio::test]
    async fn test_empty_body_is_rejected() {
        let sig = signature::sign(b"", SECRET.as_bytes());
        let response = test_router()
            .oneshot(webhook_request("", Some(&sig)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_signature_is_unauthorized() {
        let response = test_router()
            .oneshot(webhook_request(r#"{"a":1}"#, Some("deadbeef")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(error_code(response).await, 1001);
    }

    #[tokio::test]
    async fn test_uppercase_signature_is_unauthorized() {
        let body = r#"{"order_id":"550e8400-e29b-41d4-a716-446655440000","payment_status":"paid"}"#;
        let sig = signature::sign(body.as_bytes(), SECRET.as_bytes()).to_uppercase();
        let response = test_router()
            .oneshot(webhook_request(body, Some(&sig)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_signed_but_malformed_payload_is_bad_request() {
        let body = r#"{"not":"a payment event"}"#;
        let sig = signature::sign(body.as_bytes(), SECRET.as_bytes());
        let response = test_router()
            .oneshot(webhook_request(body, Some(&sig)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(response).await, 5001);
    }

    #[tokio::test]
    async fn test_signed_unpaid_status_is_rejected_before_lookup() {
        let body = r#"{"order_id":"550e8400-e29b-41d4-a716-446655440000","payment_status":"unpaid"}"#;
        let sig = signature::sign(body.as_bytes(), SECRET.as_bytes());
        let response = test_router()
            .oneshot(webhook_request(body, Some(&sig)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(response).await, 5001);
    }

    #[tokio::test]
    async fn test_signed_nil_order_id_is_rejected_before_lookup() {
        let body = r#"{"order_id":"00000000-0000-0000-0000-000000000000","payment_status":"paid"}"#;
        let sig = signature::sign(body.as_bytes(), SECRET.as_bytes());
        let response = test_router()
            .oneshot(webhook_request(body, Some(&sig)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(response).await, 5001);
    }
}
