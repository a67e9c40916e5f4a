use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Extension,
    extract::{Json, Path, Query},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::models::payment::CreatePaymentRequest;
use crate::payment::vnpay::CallbackOutcome;
use crate::services::payment_service::PaymentService;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

pub async fn create_payment(
    Extension(service): Extension<Arc<PaymentService>>,
    headers: HeaderMap,
    Json(request): Json<CreatePaymentRequest>,
) -> Response {
    let ip_addr = client_ip(&headers);

    match service.create_payment(request, ip_addr).await {
        Ok(response) => {
            (StatusCode::OK, Json(json!({ "success": true, "data": response }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Landing endpoint for the shopper's redirect back from the gateway.
/// Reports the verified outcome; order state is only ever changed by the
/// IPN.
pub async fn vnpay_return(
    Extension(service): Extension<Arc<PaymentService>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    match service.handle_return(&params) {
        Ok(CallbackOutcome::Success {
            order_id,
            amount,
            transaction_id,
            bank_code,
            paid_at,
        }) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "order_id": order_id,
                    "amount": amount,
                    "transaction_id": transaction_id,
                    "bank_code": bank_code,
                    "paid_at": paid_at
                }
            })),
        )
            .into_response(),
        Ok(CallbackOutcome::Failure {
            order_id,
            response_code,
            message,
        }) => (
            StatusCode::OK,
            Json(json!({
                "success": false,
                "error": {
                    "type": "PaymentFailed",
                    "order_id": order_id,
                    "code": response_code,
                    "message": message
                }
            })),
        )
            .into_response(),
        Ok(CallbackOutcome::InvalidSignature) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "error": {
                    "type": "InvalidSignature",
                    "message": "callback signature verification failed"
                }
            })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Server-to-server confirmation endpoint. Always HTTP 200 with the
/// RspCode envelope the gateway retries against.
pub async fn vnpay_ipn(
    Extension(service): Extension<Arc<PaymentService>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    match service.handle_ipn(&params).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn query_payment(
    Extension(service): Extension<Arc<PaymentService>>,
    Path(order_id): Path<String>,
) -> Response {
    match service.query_payment(&order_id).await {
        Ok(status) => {
            (StatusCode::OK, Json(json!({ "success": true, "status": status }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .unwrap_or_else(|| "127.0.0.1".to_string())
}
