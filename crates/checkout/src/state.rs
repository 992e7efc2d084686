//! Checkout outcome.

use serde::{Deserialize, Serialize};

/// How a checkout that debited the wallet ended.
///
/// ```text
/// debit ok ──┬──► payment recorded, booking PAID ──► Settled
///            └──► payment or status update failed ──► Unreconciled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckoutStatus {
    /// Wallet debited, payment recorded and booking marked paid.
    Settled,

    /// Wallet debited but the booking is not known to be paid.
    Unreconciled,
}

impl CheckoutStatus {
    pub fn is_settled(&self) -> bool {
        matches!(self, CheckoutStatus::Settled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStatus::Settled => "SETTLED",
            CheckoutStatus::Unreconciled => "UNRECONCILED",
        }
    }
}

impl std::fmt::Display for CheckoutStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
