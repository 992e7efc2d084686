use async_trait::async_trait;
use common::{Amount, BookingId, PaymentId};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::error::{PaymentError, Result};
use crate::model::{Payment, PaymentStatus};
use crate::store::PaymentStore;

/// PostgreSQL-backed payment store.
#[derive(Clone)]
pub struct PostgresPaymentStore {
    pool: PgPool,
}

impl PostgresPaymentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_payment(row: &PgRow) -> Result<Payment> {
        let status: String = row.try_get("status")?;
        let status = status
            .parse::<PaymentStatus>()
            .map_err(|e| PaymentError::Database(sqlx::Error::Decode(e.into())))?;

        Ok(Payment {
            id: PaymentId::from_uuid(row.try_get::<Uuid, _>("id")?),
            booking_id: BookingId::from_uuid(row.try_get::<Uuid, _>("booking_id")?),
            amount: Amount::new(row.try_get("amount")?),
            method: row.try_get("method")?,
            status,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl PaymentStore for PostgresPaymentStore {
    async fn insert(&self, payment: Payment) -> Result<Payment> {
        sqlx::query(
            r#"
            INSERT INTO payments (id, booking_id, amount, method, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(payment.booking_id.as_uuid())
        .bind(payment.amount.value())
        .bind(&payment.method)
        .bind(payment.status.as_str())
        .bind(payment.created_at)
        .execute(&self.pool)
        .await?;

        Ok(payment)
    }

    async fn list_for_booking(&self, booking_id: BookingId) -> Result<Vec<Payment>> {
        let rows = sqlx::query(
            r#"
            SELECT id, booking_id, amount, method, status, created_at
            FROM payments
            WHERE booking_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(booking_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_payment).collect()
    }
}
