//! Promo code endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use catalog::Promo;
use common::Amount;
use serde::Deserialize;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreatePromoRequest {
    pub code: String,
    pub discount: Amount,
}

/// GET /promos: active promos only.
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Promo>>, ApiError> {
    Ok(Json(state.promos.promos().await?))
}

/// POST /promos
pub async fn create(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreatePromoRequest>,
) -> Result<(StatusCode, Json<Promo>), ApiError> {
    let promo = state.promos.create_promo(&req.code, req.discount).await?;
    Ok((StatusCode::CREATED, Json(promo)))
}

/// GET /promos/{code}: 404 for unknown codes, 409 for expired ones.
pub async fn check(
    State(state): State<Arc<AppState>>,
    ApiPath(code): ApiPath<String>,
) -> Result<Json<Promo>, ApiError> {
    Ok(Json(state.promos.check_promo(&code).await?))
}

/// POST /promos/{code}/expire
pub async fn expire(
    State(state): State<Arc<AppState>>,
    ApiPath(code): ApiPath<String>,
) -> Result<Json<Promo>, ApiError> {
    Ok(Json(state.promos.expire_promo(&code).await?))
}
