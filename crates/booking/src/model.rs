use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use common::{BookingId, UserId};
use serde::{Deserialize, Serialize};

/// What a booking is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingKind {
    #[default]
    Flight,
    Hotel,
}

impl BookingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flight => "FLIGHT",
            Self::Hotel => "HOTEL",
        }
    }
}

impl fmt::Display for BookingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FLIGHT" => Ok(Self::Flight),
            "HOTEL" => Ok(Self::Hotel),
            other => Err(format!("unknown booking kind: {other}")),
        }
    }
}

/// Booking lifecycle: `BOOKED` until paid, then `PAID`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Booked,
    Paid,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Booked => "BOOKED",
            Self::Paid => "PAID",
        }
    }

    /// Returns true if a booking in this status may be set to `next`.
    ///
    /// Re-applying the current status is allowed.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (Self::Booked, Self::Paid) | (Self::Booked, Self::Booked) | (Self::Paid, Self::Paid)
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BOOKED" => Ok(Self::Booked),
            "PAID" => Ok(Self::Paid),
            other => Err(format!("unknown booking status: {other}")),
        }
    }
}

/// A flight or hotel booking.
///
/// Flight bookings carry `flight_code`, hotel bookings carry `hotel_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub user_id: UserId,
    pub kind: BookingKind,
    pub flight_code: Option<String>,
    pub hotel_name: Option<String>,
    pub passenger_name: String,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn flight(
        user_id: UserId,
        flight_code: impl Into<String>,
        passenger_name: impl Into<String>,
    ) -> Self {
        let mut booking = Self::booked(user_id, BookingKind::Flight, passenger_name.into());
        booking.flight_code = Some(flight_code.into());
        booking
    }

    pub fn hotel(
        user_id: UserId,
        hotel_name: impl Into<String>,
        passenger_name: impl Into<String>,
    ) -> Self {
        let mut booking = Self::booked(user_id, BookingKind::Hotel, passenger_name.into());
        booking.hotel_name = Some(hotel_name.into());
        booking
    }

    fn booked(user_id: UserId, kind: BookingKind, passenger_name: String) -> Self {
        Self {
            id: BookingId::new(),
            user_id,
            kind,
            flight_code: None,
            hotel_name: None,
            passenger_name,
            status: BookingStatus::Booked,
            created_at: Utc::now(),
        }
    }
}

/// Request to create a booking. `kind` defaults to `FLIGHT`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewBooking {
    #[serde(default)]
    pub kind: Option<BookingKind>,
    #[serde(default)]
    pub flight_code: Option<String>,
    #[serde(default)]
    pub hotel_name: Option<String>,
    pub passenger_name: String,
}
