//! Integer money amounts in the smallest currency unit.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced by checked amount arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Subtracting would take the amount below zero.
    #[error("insufficient amount: have {available}, need {requested}")]
    Insufficient { available: i64, requested: i64 },

    /// Adding would overflow the representable range.
    #[error("amount overflow")]
    Overflow,
}

/// Money amount in the smallest currency unit (e.g. 1_500_000 = Rp 1.500.000).
///
/// Balances, prices, discounts and payment amounts all use this type. Values
/// are never fractional; arithmetic that could go negative is checked.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    /// Creates an amount from a raw minor-unit value.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns zero.
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Returns the raw minor-unit value.
    pub const fn value(&self) -> i64 {
        self.0
    }

    /// Returns true if the amount is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds `other`, failing on overflow.
    pub fn checked_add(&self, other: Amount) -> Result<Amount, AmountError> {
        self.0
            .checked_add(other.0)
            .map(Amount)
            .ok_or(AmountError::Overflow)
    }

    /// Subtracts `other`, failing if the result would be negative.
    pub fn checked_sub(&self, other: Amount) -> Result<Amount, AmountError> {
        if other.0 > self.0 {
            return Err(AmountError::Insufficient {
                available: self.0,
                requested: other.0,
            });
        }
        Ok(Amount(self.0 - other.0))
    }

    /// Subtracts `other`, flooring the result at zero.
    pub fn saturating_sub(&self, other: Amount) -> Amount {
        Amount((self.0 - other.0).max(0))
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self(value)
    }
}
