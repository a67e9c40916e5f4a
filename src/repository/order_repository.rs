use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::order::PaymentAttempt;
use crate::error::PaymentError;

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Upserts the attempt, keyed by order id.
    async fn save(&self, attempt: &PaymentAttempt) -> Result<(), PaymentError>;

    async fn find_by_order_id(
        &self,
        order_id: &str,
    ) -> Result<Option<PaymentAttempt>, PaymentError>;
}

/// Process-local store. The codec owns no persisted state and the shop's
/// database is out of scope here, so attempts live for the lifetime of
/// the process.
#[derive(Default)]
pub struct InMemoryOrderRepository {
    attempts: RwLock<HashMap<String, PaymentAttempt>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn save(&self, attempt: &PaymentAttempt) -> Result<(), PaymentError> {
        let mut attempts = self.attempts.write().await;
        attempts.insert(attempt.order_id.clone(), attempt.clone());
        Ok(())
    }

    async fn find_by_order_id(
        &self,
        order_id: &str,
    ) -> Result<Option<PaymentAttempt>, PaymentError> {
        let attempts = self.attempts.read().await;
        Ok(attempts.get(order_id).cloned())
    }
}
