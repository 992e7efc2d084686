//! Booking payment endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use payment::{PayBooking, PaymentReceipt};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

/// POST /payments: records a payment and marks the booking `PAID`.
///
/// The payment stays recorded when the status update fails; the receipt
/// then reports `booking_marked_paid: false`.
#[tracing::instrument(skip(state, req))]
pub async fn pay(
    State(state): State<Arc<AppState>>,
    AuthUser(_): AuthUser,
    ApiJson(req): ApiJson<PayBooking>,
) -> Result<(StatusCode, Json<PaymentReceipt>), ApiError> {
    let receipt = state
        .payments
        .pay_booking(req.booking_id, req.amount, req.method)
        .await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}
