use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use common::{Amount, PromoId};
use serde::{Deserialize, Serialize};

/// Lifecycle of a promo code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromoStatus {
    Active,
    Expired,
}

impl PromoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Expired => "EXPIRED",
        }
    }
}

impl fmt::Display for PromoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromoStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "EXPIRED" => Ok(Self::Expired),
            other => Err(format!("unknown promo status: {other}")),
        }
    }
}

/// A fixed-amount discount code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Promo {
    pub id: PromoId,
    pub code: String,
    pub discount: Amount,
    pub status: PromoStatus,
    pub created_at: DateTime<Utc>,
}

impl Promo {
    /// Creates an active promo.
    pub fn new(code: impl Into<String>, discount: Amount) -> Self {
        Self {
            id: PromoId::new(),
            code: code.into(),
            discount,
            status: PromoStatus::Active,
            created_at: Utc::now(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == PromoStatus::Active
    }

    /// Returns `price` minus the discount, never below zero.
    pub fn apply_to(&self, price: Amount) -> Amount {
        price.saturating_sub(self.discount)
    }
}
