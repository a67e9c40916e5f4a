use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub server_host: String,
    pub server_port: u16,
    pub vnpay: VnpaySettings,
}

/// Merchant-side VNPay credentials and endpoints. The terminal code and
/// hash secret are issued per merchant; the payment URL defaults to the
/// sandbox gateway.
#[derive(Debug, Deserialize, Clone)]
pub struct VnpaySettings {
    pub tmn_code: String,
    pub hash_secret: String,
    pub payment_url: String,
    pub return_url: String,
}

impl AppSettings {
    pub fn from_env() -> Self {
        Self {
            server_host: std::env::var("SERVER_HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: std::env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            vnpay: VnpaySettings {
                tmn_code: std::env::var("VNPAY_TMN_CODE")
                    .unwrap_or_else(|_| "DEMOV210".to_string()),
                hash_secret: std::env::var("VNPAY_HASH_SECRET")
                    .unwrap_or_else(|_| "default_secret_please_change_in_production".to_string()),
                payment_url: std::env::var("VNPAY_PAYMENT_URL").unwrap_or_else(|_| {
                    "https://sandbox.vnpayment.vn/paymentv2/vpcpay.html".to_string()
                }),
                return_url: std::env::var("VNPAY_RETURN_URL").unwrap_or_else(|_| {
                    "http://localhost:3000/api/v1/payment/vnpay/return".to_string()
                }),
            },
        }
    }
}
