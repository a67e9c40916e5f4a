//! Fixed `vnp_ResponseCode` → message table from the gateway
//! documentation. Messages are the gateway's own Vietnamese wording and
//! are surfaced to shoppers as-is.

use std::collections::HashMap;

use once_cell::sync::Lazy;

pub const SUCCESS_CODE: &str = "00";

/// Fallback for codes the documentation does not list.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Lỗi không xác định";

static RESPONSE_MESSAGES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("00", "Giao dịch thành công"),
        ("01", "Giao dịch chưa hoàn tất"),
        (
            "07",
            "Trừ tiền thành công. Giao dịch bị nghi ngờ (liên quan tới lừa đảo, giao dịch bất thường).",
        ),
        (
            "09",
            "Giao dịch không thành công do: Thẻ/Tài khoản của khách hàng chưa đăng ký dịch vụ InternetBanking tại ngân hàng.",
        ),
        (
            "10",
            "Giao dịch không thành công do: Khách hàng xác thực thông tin thẻ/tài khoản không đúng quá 3 lần",
        ),
        (
            "11",
            "Giao dịch không thành công do: Đã hết hạn chờ thanh toán. Xin quý khách vui lòng thực hiện lại giao dịch.",
        ),
        (
            "12",
            "Giao dịch không thành công do: Thẻ/Tài khoản của khách hàng bị khóa.",
        ),
        (
            "13",
            "Giao dịch không thành công do Quý khách nhập sai mật khẩu xác thực giao dịch (OTP). Xin quý khách vui lòng thực hiện lại giao dịch.",
        ),
        (
            "24",
            "Giao dịch không thành công do: Khách hàng hủy giao dịch",
        ),
        (
            "51",
            "Giao dịch không thành công do: Tài khoản của quý khách không đủ số dư để thực hiện giao dịch.",
        ),
        (
            "65",
            "Giao dịch không thành công do: Tài khoản của Quý khách đã vượt quá hạn mức giao dịch trong ngày.",
        ),
        ("75", "Ngân hàng thanh toán đang bảo trì."),
        (
            "79",
            "Giao dịch không thành công do: KH nhập sai mật khẩu thanh toán quá số lần quy định. Xin quý khách vui lòng thực hiện lại giao dịch",
        ),
        (
            "99",
            "Các lỗi khác (lỗi còn lại, không có trong danh sách mã lỗi đã liệt kê)",
        ),
    ])
});

pub fn message_for(code: &str) -> &'static str {
    RESPONSE_MESSAGES
        .get(code)
        .copied()
        .unwrap_or(UNKNOWN_ERROR_MESSAGE)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("00", "Giao dịch thành công")]
    #[case("75", "Ngân hàng thanh toán đang bảo trì.")]
    #[case(
        "24",
        "Giao dịch không thành công do: Khách hàng hủy giao dịch"
    )]
    fn test_known_codes(#[case] code: &str, #[case] expected: &str) {
        assert_eq!(message_for(code), expected);
    }

    #[rstest]
    #[case("77")]
    #[case("")]
    #[case("abc")]
    fn test_unknown_codes_fall_back(#[case] code: &str) {
        assert_eq!(message_for(code), UNKNOWN_ERROR_MESSAGE);
    }

    #[test]
    fn test_cancellation_message_wording() {
        assert!(message_for("24").contains("hủy giao dịch"));
    }

    #[test]
    fn test_table_size() {
        assert_eq!(RESPONSE_MESSAGES.len(), 14);
    }
}
