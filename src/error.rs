use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use serde_json::json;
use thiserror::Error;

use crate::models::enums::OrderStatus;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("order not found: {0}")]
    OrderNotFound(String),

    #[error("order already paid: {0}")]
    DuplicateOrder(String),

    #[error("invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: OrderStatus, to: OrderStatus },

    #[error("query encoding error: {0}")]
    Encoding(String),

    #[error("signature error: {0}")]
    Signature(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            PaymentError::InvalidParameters(_) => (StatusCode::BAD_REQUEST, "InvalidParameters"),
            PaymentError::OrderNotFound(_) => (StatusCode::NOT_FOUND, "OrderNotFound"),
            PaymentError::DuplicateOrder(_) => (StatusCode::CONFLICT, "DuplicateOrder"),
            PaymentError::InvalidStateTransition { .. } => {
                (StatusCode::CONFLICT, "InvalidStateTransition")
            }
            PaymentError::Encoding(_) => (StatusCode::INTERNAL_SERVER_ERROR, "EncodingError"),
            PaymentError::Signature(_) => (StatusCode::INTERNAL_SERVER_ERROR, "SignatureError"),
            PaymentError::Configuration(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "ConfigurationError")
            }
            PaymentError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "InternalError"),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "server error");
        }

        let body = Json(json!({
            "success": false,
            "error": {
                "type": error_type,
                "message": self.to_string()
            }
        }));

        (status, body).into_response()
    }
}
