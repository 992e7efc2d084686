use async_trait::async_trait;
use common::{BookingId, UserId};

use crate::error::Result;
use crate::model::{Booking, BookingStatus};

/// Persistence for bookings.
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn insert(&self, booking: Booking) -> Result<Booking>;

    async fn find(&self, id: BookingId) -> Result<Option<Booking>>;

    /// Deletes a booking. Returns false if it did not exist.
    async fn delete(&self, id: BookingId) -> Result<bool>;

    /// Sets a booking's status. Returns `None` if the booking is unknown.
    async fn set_status(&self, id: BookingId, status: BookingStatus) -> Result<Option<Booking>>;

    /// Returns a user's bookings, newest first.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Booking>>;
}
