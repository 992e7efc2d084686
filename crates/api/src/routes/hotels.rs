//! Hotel catalog endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use catalog::{Hotel, NewHotel};
use common::HotelId;
use serde::Deserialize;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UpdateHotelRequest {
    pub image_url: String,
}

/// GET /hotels
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Hotel>>, ApiError> {
    Ok(Json(state.hotels.hotels().await?))
}

/// POST /hotels
pub async fn create(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<NewHotel>,
) -> Result<(StatusCode, Json<Hotel>), ApiError> {
    let hotel = state.hotels.add_hotel(req).await?;
    Ok((StatusCode::CREATED, Json(hotel)))
}

/// GET /hotels/{id}
pub async fn get(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Hotel>, ApiError> {
    let id = parse_hotel_id(&id)?;
    Ok(Json(state.hotels.hotel(id).await?))
}

/// PATCH /hotels/{id}: replaces the hotel image.
pub async fn update(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<String>,
    ApiJson(req): ApiJson<UpdateHotelRequest>,
) -> Result<Json<Hotel>, ApiError> {
    let id = parse_hotel_id(&id)?;
    Ok(Json(state.hotels.update_hotel(id, &req.image_url).await?))
}

fn parse_hotel_id(raw: &str) -> Result<HotelId, ApiError> {
    raw.parse()
        .map_err(|e| ApiError::BadRequest(format!("Invalid hotel ID: {e}")))
}
