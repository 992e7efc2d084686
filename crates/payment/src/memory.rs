use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use common::BookingId;
use tokio::sync::RwLock;

use crate::error::{PaymentError, Result};
use crate::model::Payment;
use crate::store::PaymentStore;

/// In-memory payment store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentStore {
    payments: Arc<RwLock<Vec<Payment>>>,
    fail_on_insert: Arc<AtomicBool>,
}

impl InMemoryPaymentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent inserts fail as if the database were down.
    pub fn set_fail_on_insert(&self, fail: bool) {
        self.fail_on_insert.store(fail, Ordering::SeqCst);
    }

    pub async fn payment_count(&self) -> usize {
        self.payments.read().await.len()
    }
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn insert(&self, payment: Payment) -> Result<Payment> {
        if self.fail_on_insert.load(Ordering::SeqCst) {
            return Err(PaymentError::Database(sqlx::Error::PoolClosed));
        }
        self.payments.write().await.push(payment.clone());
        Ok(payment)
    }

    async fn list_for_booking(&self, booking_id: BookingId) -> Result<Vec<Payment>> {
        let payments = self.payments.read().await;
        Ok(payments
            .iter()
            .filter(|p| p.booking_id == booking_id)
            .cloned()
            .collect())
    }
}
