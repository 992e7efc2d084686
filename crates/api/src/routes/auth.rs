//! Registration and login.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use membership::{AuthPayload, RegisterUser, User};
use serde::Deserialize;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /auth/register
#[tracing::instrument(skip(state, req))]
pub async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<RegisterUser>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state.membership.register(req).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /auth/login: exchanges credentials for a bearer token.
#[tracing::instrument(skip(state, req))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<AuthPayload>, ApiError> {
    let payload = state.membership.login(&req.email, &req.password).await?;
    Ok(Json(payload))
}
