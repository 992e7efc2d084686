//! Booking endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use booking::{Booking, BookingStatus, NewBooking};
use common::BookingId;
use payment::Payment;
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: BookingStatus,
}

/// POST /bookings: FLIGHT bookings are checked against and synced to the airline.
#[tracing::instrument(skip(state, req))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    ApiJson(req): ApiJson<NewBooking>,
) -> Result<(StatusCode, Json<Booking>), ApiError> {
    let booking = state.bookings.create_booking(user_id, req).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// GET /bookings: the caller's bookings, newest first.
pub async fn list_mine(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Booking>>, ApiError> {
    Ok(Json(state.bookings.my_bookings(user_id).await?))
}

/// GET /bookings/{id}
pub async fn get(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Booking>, ApiError> {
    let id = parse_booking_id(&id)?;
    Ok(Json(state.bookings.booking_by_id(id).await?))
}

/// POST /bookings/{id}/status
#[tracing::instrument(skip(state, req))]
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<String>,
    ApiJson(req): ApiJson<UpdateStatusRequest>,
) -> Result<Json<Booking>, ApiError> {
    let id = parse_booking_id(&id)?;
    let booking = state.bookings.update_booking_status(id, req.status).await?;
    Ok(Json(booking))
}

/// GET /bookings/{id}/payments
pub async fn payments(
    State(state): State<Arc<AppState>>,
    AuthUser(_): AuthUser,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Vec<Payment>>, ApiError> {
    let id = parse_booking_id(&id)?;
    Ok(Json(state.payments.payments_for_booking(id).await?))
}

pub(crate) fn parse_booking_id(raw: &str) -> Result<BookingId, ApiError> {
    raw.parse()
        .map_err(|e| ApiError::BadRequest(format!("Invalid booking ID: {e}")))
}
