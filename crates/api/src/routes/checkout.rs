//! Wallet checkout endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use ::checkout::{CheckoutReceipt, CheckoutRequest};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

/// POST /checkout: promo, wallet debit, then booking payment.
#[tracing::instrument(skip(state, req))]
pub async fn checkout(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    ApiJson(req): ApiJson<CheckoutRequest>,
) -> Result<Json<CheckoutReceipt>, ApiError> {
    Ok(Json(state.checkout.checkout(user_id, req).await?))
}
