use async_trait::async_trait;
use common::BookingId;

use crate::error::Result;
use crate::model::Payment;

/// Persistence for payment records.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn insert(&self, payment: Payment) -> Result<Payment>;

    /// Returns the payments for a booking, oldest first.
    async fn list_for_booking(&self, booking_id: BookingId) -> Result<Vec<Payment>>;
}
