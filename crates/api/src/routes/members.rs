//! Profile and wallet endpoints for the signed-in member.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use common::Amount;
use membership::{ProfileUpdate, Transaction, User, WalletAccount, WalletReceipt};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct TopUpRequest {
    pub amount: Amount,
}

#[derive(Deserialize)]
pub struct WalletPaymentRequest {
    pub amount: Amount,
    #[serde(default)]
    pub description: Option<String>,
}

/// GET /me
pub async fn me(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.membership.me(user_id).await?))
}

/// PATCH /me
pub async fn update_me(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    ApiJson(update): ApiJson<ProfileUpdate>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.membership.update_profile(user_id, update).await?))
}

/// GET /wallet
pub async fn wallet(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<WalletAccount>, ApiError> {
    Ok(Json(state.membership.wallet(user_id).await?))
}

/// POST /wallet/top-up
pub async fn top_up(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    ApiJson(req): ApiJson<TopUpRequest>,
) -> Result<Json<WalletReceipt>, ApiError> {
    Ok(Json(state.membership.top_up(user_id, req.amount).await?))
}

/// POST /wallet/pay: debits the wallet without touching any booking.
pub async fn pay(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    ApiJson(req): ApiJson<WalletPaymentRequest>,
) -> Result<Json<WalletReceipt>, ApiError> {
    let receipt = state
        .membership
        .pay_with_wallet(user_id, req.amount, req.description)
        .await?;
    Ok(Json(receipt))
}

/// GET /wallet/transactions: newest first.
pub async fn transactions(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    Ok(Json(state.membership.my_transactions(user_id).await?))
}
