//! Booking operations, including the flight booking flow with its
//! compensating delete.

use std::sync::Arc;

use common::{BookingId, UserId};

use crate::airline::{ACTIVE_FLIGHT_STATUS, AirlineClient, FlightSchedule, ScheduleFilter};
use crate::error::{BookingError, Result};
use crate::model::{Booking, BookingKind, BookingStatus, NewBooking};
use crate::store::BookingStore;

/// Service for flight and hotel bookings.
pub struct BookingService {
    store: Arc<dyn BookingStore>,
    airline: Arc<dyn AirlineClient>,
}

impl BookingService {
    pub fn new(store: Arc<dyn BookingStore>, airline: Arc<dyn AirlineClient>) -> Self {
        Self { store, airline }
    }

    /// Creates a booking for `user_id`.
    ///
    /// Flight bookings go through the airline: the schedule is checked, the
    /// booking is persisted as `BOOKED`, then synced. If the sync fails the
    /// booking is deleted again and the sync error is returned.
    #[tracing::instrument(skip(self, req), fields(kind = tracing::field::Empty))]
    pub async fn create_booking(&self, user_id: UserId, req: NewBooking) -> Result<Booking> {
        let passenger_name = req.passenger_name.trim();
        if passenger_name.is_empty() {
            return Err(BookingError::InvalidInput(
                "passenger name is required".to_string(),
            ));
        }

        let kind = req.kind.unwrap_or_default();
        tracing::Span::current().record("kind", kind.as_str());

        let booking = match kind {
            BookingKind::Hotel => {
                let hotel_name =
                    required(req.hotel_name, "hotel name is required for HOTEL bookings")?;
                self.store
                    .insert(Booking::hotel(user_id, hotel_name, passenger_name))
                    .await?
            }
            BookingKind::Flight => {
                let flight_code =
                    required(req.flight_code, "flight code is required for FLIGHT bookings")?;
                self.create_flight_booking(user_id, flight_code, passenger_name)
                    .await?
            }
        };

        metrics::counter!("bookings_created_total", "kind" => kind.as_str()).increment(1);
        tracing::info!(booking_id = %booking.id, "booking created");
        Ok(booking)
    }

    async fn create_flight_booking(
        &self,
        user_id: UserId,
        flight_code: String,
        passenger_name: &str,
    ) -> Result<Booking> {
        // 1. Validate against the airline schedule
        let flight = self
            .airline
            .flight_by_code(&flight_code)
            .await
            .map_err(|source| BookingError::FlightLookup {
                code: flight_code.clone(),
                source,
            })?;
        ensure_bookable(&flight)?;

        // 2. Persist locally
        let booking = self
            .store
            .insert(Booking::flight(user_id, flight_code, passenger_name))
            .await?;

        // 3. Sync with the airline, deleting the local booking on failure
        match self.airline.sync_booking(booking.id).await {
            Ok(synced) => {
                tracing::debug!(
                    booking_id = %booking.id,
                    external_booking_id = ?synced.external_booking_id,
                    "booking synced with airline"
                );
                Ok(booking)
            }
            Err(source) => {
                metrics::counter!("booking_sync_failures_total").increment(1);
                tracing::warn!(
                    booking_id = %booking.id,
                    error = %source,
                    "airline sync failed, deleting booking"
                );

                let compensated = match self.store.delete(booking.id).await {
                    Ok(_) => {
                        metrics::counter!("booking_compensations_total").increment(1);
                        true
                    }
                    Err(e) => {
                        tracing::error!(
                            booking_id = %booking.id,
                            error = %e,
                            "compensating delete failed"
                        );
                        false
                    }
                };

                Err(BookingError::SyncFailed {
                    booking_id: booking.id,
                    compensated,
                    source,
                })
            }
        }
    }

    /// Sets a booking's status. Only `BOOKED -> PAID` moves a booking forward;
    /// re-applying the current status is a no-op.
    #[tracing::instrument(skip(self))]
    pub async fn update_booking_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<Booking> {
        let booking = self.booking_by_id(id).await?;

        if !booking.status.can_transition_to(status) {
            return Err(BookingError::InvalidStatusTransition {
                from: booking.status,
                to: status,
            });
        }
        if booking.status == status {
            return Ok(booking);
        }

        let updated = self
            .store
            .set_status(id, status)
            .await?
            .ok_or(BookingError::NotFound(id))?;

        tracing::info!(booking_id = %id, status = %status, "booking status updated");
        Ok(updated)
    }

    #[tracing::instrument(skip(self))]
    pub async fn my_bookings(&self, user_id: UserId) -> Result<Vec<Booking>> {
        self.store.list_for_user(user_id).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn booking_by_id(&self, id: BookingId) -> Result<Booking> {
        self.store.find(id).await?.ok_or(BookingError::NotFound(id))
    }

    /// Looks up a flight schedule on the airline.
    #[tracing::instrument(skip(self))]
    pub async fn airline_flight_by_code(&self, flight_code: &str) -> Result<FlightSchedule> {
        Ok(self.airline.flight_by_code(flight_code).await?)
    }

    /// Lists airline flight schedules.
    #[tracing::instrument(skip(self))]
    pub async fn airline_flight_schedules(
        &self,
        filter: &ScheduleFilter,
    ) -> Result<Vec<FlightSchedule>> {
        Ok(self.airline.flight_schedules(filter).await?)
    }
}

fn required(value: Option<String>, message: &str) -> Result<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| BookingError::InvalidInput(message.to_string()))
}

/// A flight without a status or seat count is accepted as-is.
fn ensure_bookable(flight: &FlightSchedule) -> Result<()> {
    if let Some(status) = flight.status.as_deref()
        && status != ACTIVE_FLIGHT_STATUS
    {
        return Err(BookingError::FlightInactive {
            code: flight.flight_code.clone(),
            status: status.to_string(),
        });
    }
    if flight.available_seats.is_some_and(|seats| seats < 1) {
        return Err(BookingError::NoSeatsAvailable(flight.flight_code.clone()));
    }
    Ok(())
}
