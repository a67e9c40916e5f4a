use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::money::Money;
use crate::domain::order::PaymentAttempt;
use crate::error::PaymentError;
use crate::models::enums::OrderStatus;
use crate::models::payment::{CreatePaymentRequest, CreatePaymentResponse, IpnResponse};
use crate::payment::vnpay::{CallbackOutcome, PaymentUrlRequest, VnpayGateway};
use crate::repository::order_repository::OrderRepository;

pub struct PaymentService {
    gateway: VnpayGateway,
    repository: Arc<dyn OrderRepository>,
}

impl PaymentService {
    pub fn new(gateway: VnpayGateway, repository: Arc<dyn OrderRepository>) -> Self {
        Self {
            gateway,
            repository,
        }
    }

    /// Records a pending attempt and returns the signed redirect URL.
    /// Input guards live here, not in the codec.
    pub async fn create_payment(
        &self,
        request: CreatePaymentRequest,
        ip_addr: String,
    ) -> Result<CreatePaymentResponse, PaymentError> {
        if request.order_id.trim().is_empty() {
            return Err(PaymentError::InvalidParameters(
                "order_id must not be empty".to_string(),
            ));
        }
        if request.amount <= 0 {
            return Err(PaymentError::InvalidParameters(
                "amount must be positive".to_string(),
            ));
        }

        // A paid order cannot be checked out again; a still-pending
        // attempt is replaced (the shopper retried checkout).
        if let Some(existing) = self.repository.find_by_order_id(&request.order_id).await? {
            if existing.status == OrderStatus::Paid {
                return Err(PaymentError::DuplicateOrder(request.order_id));
            }
        }

        let attempt = PaymentAttempt::new(request.order_id.clone(), Money::vnd(request.amount));
        self.repository.save(&attempt).await?;

        let payment_url = self.gateway.build_payment_url(&PaymentUrlRequest {
            order_id: request.order_id.clone(),
            amount: request.amount,
            order_info: request.order_info,
            order_type: request.order_type,
            ip_addr,
            bank_code: request.bank_code,
            locale: request.locale.unwrap_or_default(),
        })?;

        info!(order_id = %request.order_id, amount = request.amount, "payment url created");

        Ok(CreatePaymentResponse {
            order_id: request.order_id,
            payment_url,
        })
    }

    /// Verifies the return-redirect query. Display only: the IPN is the
    /// authoritative confirmation, so no order state changes here.
    pub fn handle_return(
        &self,
        params: &HashMap<String, String>,
    ) -> Result<CallbackOutcome, PaymentError> {
        self.gateway.verify_callback(params)
    }

    /// Verifies an IPN delivery and applies its outcome to the stored
    /// attempt at most once, answering with the gateway's RspCode
    /// envelope. Re-deliveries of an already-final order get `02`.
    pub async fn handle_ipn(
        &self,
        params: &HashMap<String, String>,
    ) -> Result<IpnResponse, PaymentError> {
        match self.gateway.verify_callback(params)? {
            CallbackOutcome::InvalidSignature => {
                warn!("rejected IPN with invalid signature");
                Ok(IpnResponse::invalid_signature())
            }
            CallbackOutcome::Success {
                order_id,
                amount,
                transaction_id,
                bank_code,
                ..
            } => {
                let Some(mut attempt) = self.repository.find_by_order_id(&order_id).await? else {
                    warn!(order_id = %order_id, "IPN for unknown order");
                    return Ok(IpnResponse::order_not_found());
                };

                if attempt.amount.amount != amount {
                    warn!(
                        order_id = %order_id,
                        expected = attempt.amount.amount,
                        confirmed = amount,
                        "IPN amount mismatch"
                    );
                    return Ok(IpnResponse::invalid_amount());
                }

                if attempt.status.is_final() {
                    return Ok(IpnResponse::order_already_confirmed());
                }

                attempt.mark_paid(transaction_id, bank_code)?;
                self.repository.save(&attempt).await?;
                info!(order_id = %order_id, "order confirmed paid");

                Ok(IpnResponse::confirm_success())
            }
            CallbackOutcome::Failure {
                order_id,
                response_code,
                message,
            } => {
                let Some(mut attempt) = self.repository.find_by_order_id(&order_id).await? else {
                    return Ok(IpnResponse::order_not_found());
                };

                if attempt.status.is_final() {
                    return Ok(IpnResponse::order_already_confirmed());
                }

                attempt.mark_failed(format!("{response_code}: {message}"))?;
                self.repository.save(&attempt).await?;
                info!(order_id = %order_id, response_code = %response_code, "order failed");

                Ok(IpnResponse::confirm_success())
            }
        }
    }

    pub async fn query_payment(&self, order_id: &str) -> Result<OrderStatus, PaymentError> {
        let attempt = self
            .repository
            .find_by_order_id(order_id)
            .await?
            .ok_or_else(|| PaymentError::OrderNotFound(order_id.to_string()))?;

        Ok(attempt.status)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use mockall::mock;
    use mockall::predicate::eq;

    use super::*;
    use crate::config::settings::VnpaySettings;
    use crate::payment::vnpay::codec;
    use crate::repository::order_repository::InMemoryOrderRepository;

    mock! {
        OrderRepositoryMock {}

        #[async_trait::async_trait]
        impl OrderRepository for OrderRepositoryMock {
            async fn save(&self, attempt: &PaymentAttempt) -> Result<(), PaymentError>;
            async fn find_by_order_id(
                &self,
                order_id: &str,
            ) -> Result<Option<PaymentAttempt>, PaymentError>;
        }
    }

    fn test_gateway() -> VnpayGateway {
        VnpayGateway::new(VnpaySettings {
            tmn_code: "TESTCODE".to_string(),
            hash_secret: "SECRET".to_string(),
            payment_url: "https://sandbox.vnpayment.vn/paymentv2/vpcpay.html".to_string(),
            return_url: "http://localhost:3000/api/v1/payment/vnpay/return".to_string(),
        })
    }

    fn service() -> PaymentService {
        PaymentService::new(test_gateway(), Arc::new(InMemoryOrderRepository::new()))
    }

    fn create_request(order_id: &str, amount: i64) -> CreatePaymentRequest {
        CreatePaymentRequest {
            order_id: order_id.to_string(),
            amount,
            order_info: "Order payment".to_string(),
            order_type: "other".to_string(),
            bank_code: None,
            locale: None,
        }
    }

    fn signed_callback(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        let mut params: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let sorted: BTreeMap<String, String> =
            params.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        let (_, digest) = codec::sign(&sorted, "SECRET").unwrap();
        params.insert(codec::SECURE_HASH_FIELD.to_string(), digest);
        params
    }

    fn success_callback(order_id: &str, wire_amount: &str) -> HashMap<String, String> {
        signed_callback(&[
            ("vnp_TxnRef", order_id),
            ("vnp_Amount", wire_amount),
            ("vnp_ResponseCode", "00"),
            ("vnp_TransactionNo", "14422574"),
            ("vnp_BankCode", "NCB"),
            ("vnp_PayDate", "20240601101010"),
        ])
    }

    #[tokio::test]
    async fn test_create_payment_validates_input() {
        let service = service();

        let result = service
            .create_payment(create_request("", 500000), "127.0.0.1".to_string())
            .await;
        assert!(matches!(result, Err(PaymentError::InvalidParameters(_))));

        let result = service
            .create_payment(create_request("ORD123", 0), "127.0.0.1".to_string())
            .await;
        assert!(matches!(result, Err(PaymentError::InvalidParameters(_))));

        let result = service
            .create_payment(create_request("ORD123", -5), "127.0.0.1".to_string())
            .await;
        assert!(matches!(result, Err(PaymentError::InvalidParameters(_))));
    }

    #[tokio::test]
    async fn test_create_payment_records_pending_attempt() {
        let service = service();

        let response = service
            .create_payment(create_request("ORD123", 500000), "127.0.0.1".to_string())
            .await
            .unwrap();

        assert_eq!(response.order_id, "ORD123");
        assert!(response.payment_url.contains("vnp_Amount=50000000"));
        assert_eq!(
            service.query_payment("ORD123").await.unwrap(),
            OrderStatus::Pending
        );
    }

    #[tokio::test]
    async fn test_create_payment_uses_repository_seam() {
        let mut repository = MockOrderRepositoryMock::new();
        repository
            .expect_find_by_order_id()
            .with(eq("ORD123"))
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_save().times(1).returning(|_| Ok(()));

        let service = PaymentService::new(test_gateway(), Arc::new(repository));
        service
            .create_payment(create_request("ORD123", 500000), "127.0.0.1".to_string())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_ipn_confirms_pending_order_exactly_once() {
        let service = service();
        service
            .create_payment(create_request("ORD123", 500000), "127.0.0.1".to_string())
            .await
            .unwrap();

        let callback = success_callback("ORD123", "50000000");

        let first = service.handle_ipn(&callback).await.unwrap();
        assert_eq!(first, IpnResponse::confirm_success());
        assert_eq!(
            service.query_payment("ORD123").await.unwrap(),
            OrderStatus::Paid
        );

        // Re-delivery is acknowledged but not applied again.
        let second = service.handle_ipn(&callback).await.unwrap();
        assert_eq!(second, IpnResponse::order_already_confirmed());
    }

    #[tokio::test]
    async fn test_ipn_rejects_amount_mismatch() {
        let service = service();
        service
            .create_payment(create_request("ORD123", 500000), "127.0.0.1".to_string())
            .await
            .unwrap();

        // Signed correctly, but for a different amount than the order.
        let callback = success_callback("ORD123", "999900");

        let response = service.handle_ipn(&callback).await.unwrap();
        assert_eq!(response, IpnResponse::invalid_amount());
        assert_eq!(
            service.query_payment("ORD123").await.unwrap(),
            OrderStatus::Pending
        );
    }

    #[tokio::test]
    async fn test_ipn_unknown_order() {
        let service = service();
        let callback = success_callback("NOPE", "50000000");

        let response = service.handle_ipn(&callback).await.unwrap();
        assert_eq!(response, IpnResponse::order_not_found());
    }

    #[tokio::test]
    async fn test_ipn_invalid_signature() {
        let service = service();
        let mut callback = success_callback("ORD123", "50000000");
        callback.insert("vnp_Amount".to_string(), "1".to_string());

        let response = service.handle_ipn(&callback).await.unwrap();
        assert_eq!(response, IpnResponse::invalid_signature());
    }

    #[tokio::test]
    async fn test_ipn_failure_code_marks_order_failed() {
        let service = service();
        service
            .create_payment(create_request("ORD123", 500000), "127.0.0.1".to_string())
            .await
            .unwrap();

        let callback = signed_callback(&[
            ("vnp_TxnRef", "ORD123"),
            ("vnp_Amount", "50000000"),
            ("vnp_ResponseCode", "24"),
        ]);

        let response = service.handle_ipn(&callback).await.unwrap();
        assert_eq!(response, IpnResponse::confirm_success());
        assert_eq!(
            service.query_payment("ORD123").await.unwrap(),
            OrderStatus::Failed
        );
    }

    #[tokio::test]
    async fn test_return_does_not_touch_order_state() {
        let service = service();
        service
            .create_payment(create_request("ORD123", 500000), "127.0.0.1".to_string())
            .await
            .unwrap();

        let callback = success_callback("ORD123", "50000000");
        let outcome = service.handle_return(&callback).unwrap();
        assert!(matches!(outcome, CallbackOutcome::Success { .. }));

        // Still pending: only the IPN confirms.
        assert_eq!(
            service.query_payment("ORD123").await.unwrap(),
            OrderStatus::Pending
        );
    }

    #[tokio::test]
    async fn test_create_payment_rejects_paid_order() {
        let service = service();
        service
            .create_payment(create_request("ORD123", 500000), "127.0.0.1".to_string())
            .await
            .unwrap();
        service
            .handle_ipn(&success_callback("ORD123", "50000000"))
            .await
            .unwrap();

        let result = service
            .create_payment(create_request("ORD123", 500000), "127.0.0.1".to_string())
            .await;
        assert!(matches!(result, Err(PaymentError::DuplicateOrder(_))));
    }
}
