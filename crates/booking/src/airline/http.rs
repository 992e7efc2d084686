//! GraphQL-over-HTTP airline client.

use std::time::Duration;

use async_trait::async_trait;
use common::BookingId;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::{AirlineClient, AirlineError, FlightSchedule, ScheduleFilter, SyncedBooking};

const FLIGHT_BY_CODE_QUERY: &str = r#"
query ($code: String!) {
  flightByCode(flightCode: $code) {
    id
    flightCode
    price
    availableSeats
    status
    departureLocation
    destinationLocation
    departureTime
    arrivalTime
  }
}"#;

const FLIGHT_SCHEDULES_QUERY: &str = r#"
query ($departureLocation: String, $destinationLocation: String, $departureDate: String) {
  flightSchedules(
    departureLocation: $departureLocation
    destinationLocation: $destinationLocation
    departureDate: $departureDate
  ) {
    id
    flightCode
    departureLocation
    destinationLocation
    departureTime
    arrivalTime
    price
    availableSeats
    status
  }
}"#;

const SYNC_BOOKING_MUTATION: &str = r#"
mutation ($bookingId: ID!) {
  syncKelompok2Booking(bookingId: $bookingId) {
    id
    flightCode
    passengerName
    status
    externalBookingId
  }
}"#;

const API_KEY_HEADER: &str = "x-api-key";

/// Endpoints and credentials for the airline integration.
#[derive(Debug, Clone)]
pub struct AirlineConfig {
    /// GraphQL endpoint of the schedule service.
    pub schedule_url: String,
    /// GraphQL endpoint of the booking service.
    pub booking_url: String,
    /// Partner key sent as `x-api-key` on sync calls.
    pub api_key: String,
    pub timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct FlightByCodeData {
    #[serde(rename = "flightByCode")]
    flight_by_code: Option<FlightSchedule>,
}

#[derive(Debug, Deserialize)]
struct FlightSchedulesData {
    #[serde(rename = "flightSchedules", default)]
    flight_schedules: Option<Vec<FlightSchedule>>,
}

#[derive(Debug, Deserialize)]
struct SyncBookingData {
    #[serde(rename = "syncKelompok2Booking")]
    sync_booking: Option<SyncedBooking>,
}

/// Airline client speaking GraphQL over HTTP.
#[derive(Clone)]
pub struct HttpAirlineClient {
    client: reqwest::Client,
    config: AirlineConfig,
}

impl HttpAirlineClient {
    pub fn new(config: AirlineConfig) -> Result<Self, AirlineError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    /// POSTs `{query, variables}` and unwraps the GraphQL envelope.
    async fn post_graphql<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &str,
        variables: Value,
        api_key: Option<&str>,
    ) -> Result<T, AirlineError> {
        let mut request = self
            .client
            .post(url)
            .json(&json!({ "query": query, "variables": variables }));
        if let Some(key) = api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AirlineError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body: GraphQlResponse<T> = response
            .json()
            .await
            .map_err(|e| AirlineError::InvalidResponse(e.to_string()))?;

        if let Some(first) = body.errors.into_iter().next() {
            return Err(AirlineError::GraphQl(first.message));
        }
        body.data
            .ok_or_else(|| AirlineError::InvalidResponse("missing data".to_string()))
    }
}

#[async_trait]
impl AirlineClient for HttpAirlineClient {
    #[tracing::instrument(skip(self))]
    async fn flight_by_code(&self, flight_code: &str) -> Result<FlightSchedule, AirlineError> {
        let data: FlightByCodeData = self
            .post_graphql(
                &self.config.schedule_url,
                FLIGHT_BY_CODE_QUERY,
                json!({ "code": flight_code }),
                None,
            )
            .await?;

        data.flight_by_code
            .ok_or_else(|| AirlineError::FlightNotFound(flight_code.to_string()))
    }

    #[tracing::instrument(skip(self))]
    async fn flight_schedules(
        &self,
        filter: &ScheduleFilter,
    ) -> Result<Vec<FlightSchedule>, AirlineError> {
        let variables = serde_json::to_value(filter)
            .map_err(|e| AirlineError::InvalidResponse(e.to_string()))?;
        let data: FlightSchedulesData = self
            .post_graphql(
                &self.config.schedule_url,
                FLIGHT_SCHEDULES_QUERY,
                variables,
                None,
            )
            .await?;

        Ok(data.flight_schedules.unwrap_or_default())
    }

    #[tracing::instrument(skip(self))]
    async fn sync_booking(&self, booking_id: BookingId) -> Result<SyncedBooking, AirlineError> {
        let data: SyncBookingData = self
            .post_graphql(
                &self.config.booking_url,
                SYNC_BOOKING_MUTATION,
                json!({ "bookingId": booking_id.to_string() }),
                Some(&self.config.api_key),
            )
            .await?;

        data.sync_booking.ok_or_else(|| {
            AirlineError::InvalidResponse("sync returned no booking".to_string())
        })
    }
}
