use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{BookingId, UserId};
use tokio::sync::RwLock;

use crate::error::Result;
use crate::model::{Booking, BookingStatus};
use crate::store::BookingStore;

#[derive(Debug, Default)]
struct BookingState {
    bookings: HashMap<BookingId, Booking>,
    /// Insertion order, used to break `created_at` ties.
    order: Vec<BookingId>,
}

/// In-memory booking store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBookingStore {
    state: Arc<RwLock<BookingState>>,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored bookings.
    pub async fn booking_count(&self) -> usize {
        self.state.read().await.bookings.len()
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn insert(&self, booking: Booking) -> Result<Booking> {
        let mut state = self.state.write().await;
        state.order.push(booking.id);
        state.bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn find(&self, id: BookingId) -> Result<Option<Booking>> {
        Ok(self.state.read().await.bookings.get(&id).cloned())
    }

    async fn delete(&self, id: BookingId) -> Result<bool> {
        let mut state = self.state.write().await;
        let removed = state.bookings.remove(&id).is_some();
        if removed {
            state.order.retain(|b| *b != id);
        }
        Ok(removed)
    }

    async fn set_status(&self, id: BookingId, status: BookingStatus) -> Result<Option<Booking>> {
        let mut state = self.state.write().await;
        Ok(state.bookings.get_mut(&id).map(|booking| {
            booking.status = status;
            booking.clone()
        }))
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Booking>> {
        let state = self.state.read().await;
        Ok(state
            .order
            .iter()
            .rev()
            .filter_map(|id| state.bookings.get(id))
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }
}
