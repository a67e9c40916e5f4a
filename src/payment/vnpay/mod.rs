//! VNPay redirect-protocol adapter: signs outbound payment URLs and
//! verifies inbound callback signatures. Stateless per call; the only
//! ambient input is the wall clock for `vnp_CreateDate`/`vnp_ExpireDate`,
//! which is split out so the canonical form stays deterministic in tests.

pub mod codec;
pub mod response_codes;

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use tracing::{debug, warn};

use crate::config::settings::VnpaySettings;
use crate::error::PaymentError;
use crate::models::enums::Locale;

pub const VERSION: &str = "2.1.0";
pub const COMMAND_PAY: &str = "pay";
pub const CURRENCY_CODE: &str = "VND";

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";
// The gateway expects timestamps in Vietnam local time (UTC+07:00, no DST).
const VN_UTC_OFFSET_HOURS: i64 = 7;
const EXPIRE_MINUTES: i64 = 15;

/// One outbound payment, in whole VND. No validation happens here: the
/// gateway will bounce nonsense, and the service layer guards
/// `amount > 0` / non-empty `order_id` before calling.
#[derive(Debug, Clone)]
pub struct PaymentUrlRequest {
    pub order_id: String,
    pub amount: i64,
    pub order_info: String,
    pub order_type: String,
    pub ip_addr: String,
    pub bank_code: Option<String>,
    pub locale: Locale,
}

/// Result of verifying an inbound callback. A bad signature is an
/// outcome, not an error: callers treat it as an authentication failure
/// on the callback, never as a crash.
#[derive(Debug, Clone, PartialEq)]
pub enum CallbackOutcome {
    Success {
        order_id: String,
        /// Whole VND, already divided back from the wire's ×100 form.
        amount: i64,
        transaction_id: String,
        bank_code: Option<String>,
        /// `vnp_PayDate` verbatim; opaque, not reparsed.
        paid_at: Option<String>,
    },
    Failure {
        order_id: String,
        response_code: String,
        message: &'static str,
    },
    InvalidSignature,
}

#[derive(Debug, Clone)]
pub struct VnpayGateway {
    settings: VnpaySettings,
}

impl VnpayGateway {
    pub fn new(settings: VnpaySettings) -> Self {
        Self { settings }
    }

    /// Signed redirect URL for `request`, stamped with the current time.
    pub fn build_payment_url(&self, request: &PaymentUrlRequest) -> Result<String, PaymentError> {
        self.build_payment_url_at(request, Utc::now())
    }

    /// Same, with an explicit clock. Given the same `now`, the output is
    /// byte-identical across calls.
    pub fn build_payment_url_at(
        &self,
        request: &PaymentUrlRequest,
        now: DateTime<Utc>,
    ) -> Result<String, PaymentError> {
        let create_date = vn_local(now);
        let expire_date = create_date + Duration::minutes(EXPIRE_MINUTES);

        let mut params = BTreeMap::new();
        params.insert("vnp_Version".to_string(), VERSION.to_string());
        params.insert("vnp_Command".to_string(), COMMAND_PAY.to_string());
        params.insert("vnp_TmnCode".to_string(), self.settings.tmn_code.clone());
        params.insert("vnp_Locale".to_string(), request.locale.to_string());
        params.insert("vnp_CurrCode".to_string(), CURRENCY_CODE.to_string());
        params.insert("vnp_TxnRef".to_string(), request.order_id.clone());
        params.insert("vnp_OrderInfo".to_string(), request.order_info.clone());
        params.insert("vnp_OrderType".to_string(), request.order_type.clone());
        // Minor-unit form: whole VND ×100, no decimal point.
        params.insert("vnp_Amount".to_string(), (request.amount * 100).to_string());
        params.insert("vnp_ReturnUrl".to_string(), self.settings.return_url.clone());
        params.insert("vnp_IpAddr".to_string(), request.ip_addr.clone());
        params.insert(
            "vnp_CreateDate".to_string(),
            create_date.format(TIMESTAMP_FORMAT).to_string(),
        );
        params.insert(
            "vnp_ExpireDate".to_string(),
            expire_date.format(TIMESTAMP_FORMAT).to_string(),
        );
        if let Some(bank_code) = &request.bank_code {
            params.insert("vnp_BankCode".to_string(), bank_code.clone());
        }

        let (query, digest) = codec::sign(&params, &self.settings.hash_secret)?;
        debug!(order_id = %request.order_id, "signed payment url");

        Ok(format!(
            "{}?{}&{}={}",
            self.settings.payment_url,
            query,
            codec::SECURE_HASH_FIELD,
            digest
        ))
    }

    /// Verifies the signature on a callback's query parameters and folds
    /// the gateway's response code into a [`CallbackOutcome`]. The order
    /// the parameters arrived in is irrelevant; they are re-sorted before
    /// the digest is recomputed.
    pub fn verify_callback(
        &self,
        params: &HashMap<String, String>,
    ) -> Result<CallbackOutcome, PaymentError> {
        let Some(received_hash) = params.get(codec::SECURE_HASH_FIELD) else {
            warn!("callback carried no secure hash");
            return Ok(CallbackOutcome::InvalidSignature);
        };

        let sorted: BTreeMap<String, String> =
            params.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        // sign() skips the hash fields itself, so the received hash never
        // feeds its own recomputation.
        let (_, expected_hash) = codec::sign(&sorted, &self.settings.hash_secret)?;

        if expected_hash != *received_hash {
            warn!("callback signature mismatch");
            return Ok(CallbackOutcome::InvalidSignature);
        }

        let order_id = params.get("vnp_TxnRef").cloned().unwrap_or_default();
        let response_code = params.get("vnp_ResponseCode").cloned().unwrap_or_default();

        if response_code == response_codes::SUCCESS_CODE {
            let amount = params
                .get("vnp_Amount")
                .and_then(|v| v.parse::<i64>().ok())
                .map(|v| v / 100)
                .unwrap_or_default();

            Ok(CallbackOutcome::Success {
                order_id,
                amount,
                transaction_id: params.get("vnp_TransactionNo").cloned().unwrap_or_default(),
                bank_code: params.get("vnp_BankCode").cloned(),
                paid_at: params.get("vnp_PayDate").cloned(),
            })
        } else {
            Ok(CallbackOutcome::Failure {
                order_id,
                message: response_codes::message_for(&response_code),
                response_code,
            })
        }
    }
}

fn vn_local(now: DateTime<Utc>) -> NaiveDateTime {
    now.naive_utc() + Duration::hours(VN_UTC_OFFSET_HOURS)
}
