//! Payment error types.

use thiserror::Error;

/// Errors that can occur while recording payments.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Payment amounts must be strictly positive.
    #[error("Invalid amount: {0} (must be greater than 0)")]
    InvalidAmount(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Errors from asking the booking component to mark a booking as paid.
#[derive(Debug, Error)]
pub enum StatusUpdateError {
    #[error("Booking status request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The booking component refused the update.
    #[error("Booking status update rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Booking status update failed: {0}")]
    Unavailable(String),
}

/// Result type for payment operations.
pub type Result<T> = std::result::Result<T, PaymentError>;
