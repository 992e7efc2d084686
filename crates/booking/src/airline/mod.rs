//! Port to the external airline system.
//!
//! The airline exposes two GraphQL endpoints: a schedule service
//! (`flightByCode`, `flightSchedules`) and a booking service that pulls a
//! booking from us when asked to sync it (`syncKelompok2Booking`).

mod http;
mod memory;

use async_trait::async_trait;
use common::BookingId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use http::{AirlineConfig, HttpAirlineClient};
pub use memory::InMemoryAirline;

/// Status the airline uses for bookable flights.
pub const ACTIVE_FLIGHT_STATUS: &str = "ACTIVE";

/// Errors from airline calls.
#[derive(Debug, Error)]
pub enum AirlineError {
    /// No airline endpoints were configured for this deployment.
    #[error("Airline integration not configured")]
    NotConfigured,

    #[error("Airline request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The airline answered with a non-success HTTP status.
    #[error("HTTP {status} calling {url}")]
    HttpStatus { status: u16, url: String },

    /// The first entry of the GraphQL `errors` array.
    #[error("{0}")]
    GraphQl(String),

    /// The response could not be decoded or carried no `data`.
    #[error("Invalid airline response: {0}")]
    InvalidResponse(String),

    #[error("Flight not found: {0}")]
    FlightNotFound(String),
}

/// A flight schedule as published by the airline.
///
/// Only `id` and `flight_code` are guaranteed; everything else may be null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSchedule {
    pub id: String,
    pub flight_code: String,
    #[serde(default)]
    pub departure_location: Option<String>,
    #[serde(default)]
    pub destination_location: Option<String>,
    #[serde(default)]
    pub departure_time: Option<String>,
    #[serde(default)]
    pub arrival_time: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub available_seats: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
}

impl FlightSchedule {
    /// Creates an active schedule with the given seat count.
    pub fn active(flight_code: impl Into<String>, available_seats: i64) -> Self {
        let flight_code = flight_code.into();
        Self {
            id: flight_code.clone(),
            flight_code,
            departure_location: None,
            destination_location: None,
            departure_time: None,
            arrival_time: None,
            price: None,
            available_seats: Some(available_seats),
            status: Some(ACTIVE_FLIGHT_STATUS.to_string()),
        }
    }
}

/// Optional filters for `flightSchedules`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleFilter {
    #[serde(default)]
    pub departure_location: Option<String>,
    #[serde(default)]
    pub destination_location: Option<String>,
    /// Departure date as the airline expects it (`YYYY-MM-DD`).
    #[serde(default)]
    pub departure_date: Option<String>,
}

impl ScheduleFilter {
    pub fn matches(&self, flight: &FlightSchedule) -> bool {
        fn field_matches(filter: &Option<String>, value: &Option<String>) -> bool {
            match filter {
                Some(wanted) => value.as_deref() == Some(wanted.as_str()),
                None => true,
            }
        }

        field_matches(&self.departure_location, &flight.departure_location)
            && field_matches(&self.destination_location, &flight.destination_location)
            && self.departure_date.as_deref().is_none_or(|date| {
                flight
                    .departure_time
                    .as_deref()
                    .is_some_and(|t| t.starts_with(date))
            })
    }
}

/// The airline's copy of a synced booking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncedBooking {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub flight_code: Option<String>,
    #[serde(default)]
    pub passenger_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub external_booking_id: Option<String>,
}

/// Operations on the external airline.
#[async_trait]
pub trait AirlineClient: Send + Sync {
    /// Looks up one flight schedule.
    ///
    /// Fails with `FlightNotFound` when the airline returns no schedule.
    async fn flight_by_code(&self, flight_code: &str) -> Result<FlightSchedule, AirlineError>;

    /// Lists flight schedules matching the filter.
    async fn flight_schedules(
        &self,
        filter: &ScheduleFilter,
    ) -> Result<Vec<FlightSchedule>, AirlineError>;

    /// Asks the airline to pull and record a booking.
    async fn sync_booking(&self, booking_id: BookingId) -> Result<SyncedBooking, AirlineError>;
}

/// Airline client used when no airline endpoints are configured.
///
/// Every call fails with [`AirlineError::NotConfigured`], so hotel bookings
/// keep working while flight bookings are refused.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredAirline;

#[async_trait]
impl AirlineClient for UnconfiguredAirline {
    async fn flight_by_code(&self, _flight_code: &str) -> Result<FlightSchedule, AirlineError> {
        Err(AirlineError::NotConfigured)
    }

    async fn flight_schedules(
        &self,
        _filter: &ScheduleFilter,
    ) -> Result<Vec<FlightSchedule>, AirlineError> {
        Err(AirlineError::NotConfigured)
    }

    async fn sync_booking(&self, _booking_id: BookingId) -> Result<SyncedBooking, AirlineError> {
        Err(AirlineError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_decodes_with_nulls() {
        let json = r#"{
            "id": "17",
            "flightCode": "GA-410",
            "price": 1500000.0,
            "availableSeats": null,
            "status": "ACTIVE",
            "departureLocation": "CGK",
            "destinationLocation": "DPS",
            "departureTime": "2026-12-20T07:00:00Z",
            "arrivalTime": null
        }"#;
        let flight: FlightSchedule = serde_json::from_str(json).unwrap();
        assert_eq!(flight.flight_code, "GA-410");
        assert_eq!(flight.available_seats, None);
        assert_eq!(flight.price, Some(1_500_000.0));
    }

    #[test]
    fn filter_matches_on_date_prefix() {
        let mut flight = FlightSchedule::active("GA-410", 3);
        flight.departure_location = Some("CGK".to_string());
        flight.departure_time = Some("2026-12-20T07:00:00Z".to_string());

        let filter = ScheduleFilter {
            departure_location: Some("CGK".to_string()),
            departure_date: Some("2026-12-20".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&flight));

        let other_day = ScheduleFilter {
            departure_date: Some("2026-12-21".to_string()),
            ..Default::default()
        };
        assert!(!other_day.matches(&flight));
        assert!(ScheduleFilter::default().matches(&flight));
    }
}
