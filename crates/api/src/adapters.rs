//! In-process wiring between services that talk over ports.

use std::sync::Arc;

use async_trait::async_trait;
use booking::{BookingError, BookingService, BookingStatus};
use common::BookingId;
use payment::{BookingStatusClient, StatusUpdateError};

/// Marks bookings as paid by calling the booking service directly.
pub struct LocalBookingStatus {
    bookings: Arc<BookingService>,
}

impl LocalBookingStatus {
    pub fn new(bookings: Arc<BookingService>) -> Self {
        Self { bookings }
    }
}

#[async_trait]
impl BookingStatusClient for LocalBookingStatus {
    async fn mark_paid(&self, booking_id: BookingId) -> Result<(), StatusUpdateError> {
        match self
            .bookings
            .update_booking_status(booking_id, BookingStatus::Paid)
            .await
        {
            Ok(_) => Ok(()),
            Err(e @ BookingError::NotFound(_)) => Err(StatusUpdateError::Rejected {
                status: 404,
                message: e.to_string(),
            }),
            Err(e @ BookingError::InvalidStatusTransition { .. }) => {
                Err(StatusUpdateError::Rejected {
                    status: 409,
                    message: e.to_string(),
                })
            }
            Err(e) => Err(StatusUpdateError::Unavailable(e.to_string())),
        }
    }
}
