use serde::{Deserialize, Serialize};

/// Amounts are stored in the currency's base unit. VND has no minor unit
/// in circulation; the ×100 form VNPay requires on the wire is a protocol
/// detail and never lives here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub amount: i64,
    pub currency: Currency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    VND,
    USD,
}

impl Money {
    pub fn new(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    pub fn vnd(amount: i64) -> Self {
        Self { amount, currency: Currency::VND }
    }

    pub fn add(&self, other: &Self) -> Result<Self, &'static str> {
        if self.currency != other.currency {
            return Err("Cannot add different currencies");
        }

        Ok(Self {
            amount: self.amount + other.amount,
            currency: self.currency,
        })
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.currency {
            Currency::VND => write!(f, "{} ₫", self.amount),
            Currency::USD => write!(f, "${:.2}", self.amount as f64 / 100.0),
        }
    }
}
