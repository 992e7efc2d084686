//! Port through which payments mark bookings as paid.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use common::BookingId;
use serde_json::{Value, json};

use crate::error::StatusUpdateError;

/// Moves a booking to `PAID` in the booking component.
#[async_trait]
pub trait BookingStatusClient: Send + Sync {
    async fn mark_paid(&self, booking_id: BookingId) -> Result<(), StatusUpdateError>;
}

/// Calls the booking status endpoint of another deployment over HTTP.
#[derive(Clone)]
pub struct HttpBookingStatusClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBookingStatusClient {
    /// Creates a client for the API rooted at `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, StatusUpdateError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn status_url(&self, booking_id: BookingId) -> String {
        format!(
            "{}/bookings/{booking_id}/status",
            self.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl BookingStatusClient for HttpBookingStatusClient {
    #[tracing::instrument(skip(self))]
    async fn mark_paid(&self, booking_id: BookingId) -> Result<(), StatusUpdateError> {
        let response = self
            .client
            .post(self.status_url(booking_id))
            .json(&json!({ "status": "PAID" }))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.bytes().await?;
        let message = serde_json::from_slice::<Value>(&body)
            .ok()
            .and_then(|value| {
                value
                    .get("error")
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| String::from_utf8_lossy(&body).to_string());

        Err(StatusUpdateError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[derive(Debug, Default)]
struct StatusState {
    paid: Vec<BookingId>,
    fail: bool,
}

/// Records status updates in memory. Used in tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBookingStatus {
    state: Arc<RwLock<StatusState>>,
}

impl InMemoryBookingStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent updates fail.
    pub fn set_fail(&self, fail: bool) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .fail = fail;
    }

    /// Bookings marked paid so far, in order.
    pub fn paid_bookings(&self) -> Vec<BookingId> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .paid
            .clone()
    }
}

#[async_trait]
impl BookingStatusClient for InMemoryBookingStatus {
    async fn mark_paid(&self, booking_id: BookingId) -> Result<(), StatusUpdateError> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.fail {
            return Err(StatusUpdateError::Unavailable(
                "booking service unreachable".to_string(),
            ));
        }
        state.paid.push(booking_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::post;

    async fn spawn_booking_api(status: StatusCode, reply: Value) -> String {
        let app = Router::new().route(
            "/bookings/{id}/status",
            post(
                move |Path(_id): Path<String>, axum::Json(body): axum::Json<Value>| {
                    let reply = reply.clone();
                    async move {
                        assert_eq!(body["status"], "PAID");
                        (status, axum::Json(reply))
                    }
                },
            ),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        format!("http://{addr}")
    }

    #[tokio::test]
    async fn marks_booking_paid() {
        let url = spawn_booking_api(StatusCode::OK, json!({ "status": "PAID" })).await;
        let client = HttpBookingStatusClient::new(url, Duration::from_secs(5)).unwrap();

        assert!(client.mark_paid(BookingId::new()).await.is_ok());
    }

    #[tokio::test]
    async fn rejection_carries_error_message() {
        let url = spawn_booking_api(
            StatusCode::NOT_FOUND,
            json!({ "error": "Booking not found" }),
        )
        .await;
        let client = HttpBookingStatusClient::new(format!("{url}/"), Duration::from_secs(5))
            .unwrap();

        let result = client.mark_paid(BookingId::new()).await;
        assert!(matches!(
            result,
            Err(StatusUpdateError::Rejected { status: 404, message }) if message == "Booking not found"
        ));
    }

    #[tokio::test]
    async fn in_memory_failure_flag() {
        let status = InMemoryBookingStatus::new();
        let booking = BookingId::new();

        status.set_fail(true);
        assert!(status.mark_paid(booking).await.is_err());
        status.set_fail(false);
        status.mark_paid(booking).await.unwrap();

        assert_eq!(status.paid_bookings(), vec![booking]);
    }
}
