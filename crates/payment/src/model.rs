use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use common::{Amount, BookingId, PaymentId};
use serde::{Deserialize, Serialize};

/// Method recorded when the caller does not name one.
pub const DEFAULT_METHOD: &str = "TRANSFER";

/// Payments have no failure state; a stored payment succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Success,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUCCESS" => Ok(Self::Success),
            other => Err(format!("unknown payment status: {other}")),
        }
    }
}

/// A recorded payment for a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub booking_id: BookingId,
    pub amount: Amount,
    pub method: String,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    pub fn success(booking_id: BookingId, amount: Amount, method: impl Into<String>) -> Self {
        Self {
            id: PaymentId::new(),
            booking_id,
            amount,
            method: method.into(),
            status: PaymentStatus::Success,
            created_at: Utc::now(),
        }
    }
}

/// Request to pay for a booking.
#[derive(Debug, Clone, Deserialize)]
pub struct PayBooking {
    pub booking_id: BookingId,
    pub amount: Amount,
    #[serde(default)]
    pub method: Option<String>,
}

/// Outcome of `pay_booking`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentReceipt {
    pub payment: Payment,
    /// False when the booking could not be set to `PAID`.
    pub booking_marked_paid: bool,
}
