use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use common::BookingId;

use super::{AirlineClient, AirlineError, FlightSchedule, ScheduleFilter, SyncedBooking};

#[derive(Debug, Default)]
struct AirlineState {
    flights: HashMap<String, FlightSchedule>,
    synced: Vec<BookingId>,
    fail_on_lookup: bool,
    fail_on_sync: bool,
}

/// In-memory airline for tests and local development.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAirline {
    state: Arc<RwLock<AirlineState>>,
}

impl InMemoryAirline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes (or replaces) a flight schedule.
    pub fn add_flight(&self, flight: FlightSchedule) {
        self.write()
            .flights
            .insert(flight.flight_code.clone(), flight);
    }

    /// Makes schedule lookups fail with a transport-style error.
    pub fn set_fail_on_lookup(&self, fail: bool) {
        self.write().fail_on_lookup = fail;
    }

    /// Makes booking syncs fail with a GraphQL error.
    pub fn set_fail_on_sync(&self, fail: bool) {
        self.write().fail_on_sync = fail;
    }

    /// Returns the bookings synced so far, in order.
    pub fn synced_bookings(&self) -> Vec<BookingId> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .synced
            .clone()
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, AirlineState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl AirlineClient for InMemoryAirline {
    async fn flight_by_code(&self, flight_code: &str) -> Result<FlightSchedule, AirlineError> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        if state.fail_on_lookup {
            return Err(AirlineError::GraphQl("schedule service unavailable".to_string()));
        }
        state
            .flights
            .get(flight_code)
            .cloned()
            .ok_or_else(|| AirlineError::FlightNotFound(flight_code.to_string()))
    }

    async fn flight_schedules(
        &self,
        filter: &ScheduleFilter,
    ) -> Result<Vec<FlightSchedule>, AirlineError> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        if state.fail_on_lookup {
            return Err(AirlineError::GraphQl("schedule service unavailable".to_string()));
        }
        let mut flights: Vec<_> = state
            .flights
            .values()
            .filter(|f| filter.matches(f))
            .cloned()
            .collect();
        flights.sort_by(|a, b| a.flight_code.cmp(&b.flight_code));
        Ok(flights)
    }

    async fn sync_booking(&self, booking_id: BookingId) -> Result<SyncedBooking, AirlineError> {
        let mut state = self.write();
        if state.fail_on_sync {
            return Err(AirlineError::GraphQl(
                "partner rejected booking sync".to_string(),
            ));
        }
        state.synced.push(booking_id);

        Ok(SyncedBooking {
            id: Some(state.synced.len().to_string()),
            status: Some("CONFIRMED".to_string()),
            external_booking_id: Some(booking_id.to_string()),
            ..Default::default()
        })
    }
}
