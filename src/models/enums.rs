use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Display form of the locale is what goes on the wire as `vnp_Locale`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    #[strum(serialize = "vn")]
    Vn,
    #[strum(serialize = "en")]
    En,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum OrderStatus {
    #[serde(rename = "PENDING")]
    #[strum(serialize = "PENDING")]
    Pending,
    #[serde(rename = "PAID")]
    #[strum(serialize = "PAID")]
    Paid,
    #[serde(rename = "FAILED")]
    #[strum(serialize = "FAILED")]
    Failed,
}

impl OrderStatus {
    /// A final status can no longer change; callback re-deliveries for it
    /// are acknowledged without being applied.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Paid | Self::Failed)
    }
}
