//! Read-only proxies to the airline's flight schedules.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use booking::{FlightSchedule, ScheduleFilter};

use crate::error::ApiError;
use crate::extract::{ApiPath, ApiQuery};
use crate::state::AppState;

/// GET /airline/flights?departureLocation=&destinationLocation=&departureDate=
pub async fn flights(
    State(state): State<Arc<AppState>>,
    ApiQuery(filter): ApiQuery<ScheduleFilter>,
) -> Result<Json<Vec<FlightSchedule>>, ApiError> {
    Ok(Json(state.bookings.airline_flight_schedules(&filter).await?))
}

/// GET /airline/flights/{code}
pub async fn flight(
    State(state): State<Arc<AppState>>,
    ApiPath(code): ApiPath<String>,
) -> Result<Json<FlightSchedule>, ApiError> {
    Ok(Json(state.bookings.airline_flight_by_code(&code).await?))
}
