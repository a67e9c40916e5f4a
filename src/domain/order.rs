use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::money::Money;
use crate::error::PaymentError;
use crate::models::enums::OrderStatus;

/// One checkout attempt: the association between an order id and the
/// amount the gateway is expected to confirm for it. The codec itself is
/// stateless; this is where the surrounding workflow keeps the
/// `Pending -> Paid | Failed` lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentAttempt {
    pub id: Uuid,
    pub order_id: String,
    pub amount: Money,
    pub status: OrderStatus,
    pub transaction_id: Option<String>,
    pub bank_code: Option<String>,
    pub failure_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PaymentAttempt {
    pub fn new(order_id: String, amount: Money) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            order_id,
            amount,
            status: OrderStatus::Pending,
            transaction_id: None,
            bank_code: None,
            failure_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn mark_paid(
        &mut self,
        transaction_id: String,
        bank_code: Option<String>,
    ) -> Result<(), PaymentError> {
        self.transition_to(OrderStatus::Paid)?;
        self.transaction_id = Some(transaction_id);
        self.bank_code = bank_code;
        Ok(())
    }

    pub fn mark_failed(&mut self, reason: String) -> Result<(), PaymentError> {
        self.transition_to(OrderStatus::Failed)?;
        self.failure_reason = Some(reason);
        Ok(())
    }

    // Only Pending moves anywhere; a final status stays final.
    fn transition_to(&mut self, to: OrderStatus) -> Result<(), PaymentError> {
        if self.status != OrderStatus::Pending {
            return Err(PaymentError::InvalidStateTransition {
                from: self.status,
                to,
            });
        }

        self.status = to;
        self.updated_at = Utc::now();
        Ok(())
    }
}
