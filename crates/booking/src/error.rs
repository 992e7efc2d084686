//! Booking error types.

use common::BookingId;
use thiserror::Error;

use crate::airline::AirlineError;
use crate::model::BookingStatus;

/// Errors that can occur during booking operations.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Booking not found: {0}")]
    NotFound(BookingId),

    /// A required field is missing or malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The airline could not supply the flight schedule.
    #[error("Flight schedule {code} not available from airline: {source}")]
    FlightLookup {
        code: String,
        #[source]
        source: AirlineError,
    },

    #[error("Flight {code} is not active (status {status})")]
    FlightInactive { code: String, status: String },

    #[error("No seats available on flight {0}")]
    NoSeatsAvailable(String),

    /// Synchronising with the airline failed after the booking was persisted.
    ///
    /// `compensated` reports whether the local booking was deleted again.
    #[error("Failed to sync booking {booking_id} with airline: {source}")]
    SyncFailed {
        booking_id: BookingId,
        compensated: bool,
        #[source]
        source: AirlineError,
    },

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    /// Proxied airline call failed.
    #[error(transparent)]
    Airline(#[from] AirlineError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for booking operations.
pub type Result<T> = std::result::Result<T, BookingError>;
