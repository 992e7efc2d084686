//! Booking payment operations.

use std::sync::Arc;

use common::{Amount, BookingId};

use crate::error::{PaymentError, Result};
use crate::model::{DEFAULT_METHOD, Payment, PaymentReceipt};
use crate::status_client::BookingStatusClient;
use crate::store::PaymentStore;

/// Service for recording booking payments.
pub struct PaymentService {
    store: Arc<dyn PaymentStore>,
    bookings: Arc<dyn BookingStatusClient>,
}

impl PaymentService {
    pub fn new(store: Arc<dyn PaymentStore>, bookings: Arc<dyn BookingStatusClient>) -> Self {
        Self { store, bookings }
    }

    /// Records a successful payment, then asks for the booking to be set to
    /// `PAID`.
    ///
    /// A failed status update does not undo the payment; the receipt reports
    /// it through `booking_marked_paid`.
    #[tracing::instrument(skip(self))]
    pub async fn pay_booking(
        &self,
        booking_id: BookingId,
        amount: Amount,
        method: Option<String>,
    ) -> Result<PaymentReceipt> {
        if !amount.is_positive() {
            return Err(PaymentError::InvalidAmount(amount.value()));
        }
        let method = method
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_METHOD.to_string());

        let payment = self
            .store
            .insert(Payment::success(booking_id, amount, method))
            .await?;
        metrics::counter!("payments_recorded_total", "method" => method_label(&payment.method))
            .increment(1);

        let booking_marked_paid = match self.bookings.mark_paid(booking_id).await {
            Ok(()) => {
                tracing::info!(%booking_id, payment_id = %payment.id, "booking marked paid");
                true
            }
            Err(e) => {
                metrics::counter!("payment_status_update_failures_total").increment(1);
                tracing::error!(
                    %booking_id,
                    payment_id = %payment.id,
                    error = %e,
                    "failed to mark booking paid"
                );
                false
            }
        };

        Ok(PaymentReceipt {
            payment,
            booking_marked_paid,
        })
    }

    #[tracing::instrument(skip(self))]
    pub async fn payments_for_booking(&self, booking_id: BookingId) -> Result<Vec<Payment>> {
        self.store.list_for_booking(booking_id).await
    }
}

/// Metric label for a payment method. Methods are client-supplied, so
/// anything outside the known set shares one label.
fn method_label(method: &str) -> &'static str {
    match method {
        "WALLET" => "WALLET",
        DEFAULT_METHOD => "TRANSFER",
        _ => "other",
    }
}
