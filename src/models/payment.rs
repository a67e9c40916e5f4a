use serde::{Deserialize, Serialize};

use super::enums::Locale;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePaymentRequest {
    pub order_id: String,
    /// Whole VND. The gateway-side ×100 conversion happens at signing time.
    pub amount: i64,
    pub order_info: String,
    pub order_type: String,
    pub bank_code: Option<String>,
    pub locale: Option<Locale>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePaymentResponse {
    pub order_id: String,
    pub payment_url: String,
}

/// The acknowledgement envelope VNPay expects from an IPN endpoint. The
/// gateway keeps re-delivering a notification until it receives one of
/// these with a terminal code, so every IPN path answers HTTP 200 with an
/// `RspCode` rather than an HTTP error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpnResponse {
    #[serde(rename = "RspCode")]
    pub rsp_code: String,
    #[serde(rename = "Message")]
    pub message: String,
}

impl IpnResponse {
    fn new(rsp_code: &str, message: &str) -> Self {
        Self {
            rsp_code: rsp_code.to_string(),
            message: message.to_string(),
        }
    }

    pub fn confirm_success() -> Self {
        Self::new("00", "Confirm Success")
    }

    pub fn order_not_found() -> Self {
        Self::new("01", "Order not found")
    }

    pub fn order_already_confirmed() -> Self {
        Self::new("02", "Order already confirmed")
    }

    pub fn invalid_amount() -> Self {
        Self::new("04", "Invalid amount")
    }

    pub fn invalid_signature() -> Self {
        Self::new("97", "Invalid signature")
    }
}
