//! Shared types used across the travel booking services.

pub mod amount;
pub mod types;

pub use amount::{Amount, AmountError};
pub use types::{BookingId, HotelId, PaymentId, PromoId, TransactionId, UserId};
