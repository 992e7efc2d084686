use async_trait::async_trait;
use common::{BookingId, UserId};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::error::{BookingError, Result};
use crate::model::{Booking, BookingKind, BookingStatus};
use crate::store::BookingStore;

const BOOKING_COLUMNS: &str =
    "id, user_id, kind, flight_code, hotel_name, passenger_name, status, created_at";

/// PostgreSQL-backed booking store.
#[derive(Clone)]
pub struct PostgresBookingStore {
    pool: PgPool,
}

impl PostgresBookingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_booking(row: &PgRow) -> Result<Booking> {
        let kind: String = row.try_get("kind")?;
        let status: String = row.try_get("status")?;

        Ok(Booking {
            id: BookingId::from_uuid(row.try_get::<Uuid, _>("id")?),
            user_id: UserId::from_uuid(row.try_get::<Uuid, _>("user_id")?),
            kind: kind.parse::<BookingKind>().map_err(decode_error)?,
            flight_code: row.try_get("flight_code")?,
            hotel_name: row.try_get("hotel_name")?,
            passenger_name: row.try_get("passenger_name")?,
            status: status.parse::<BookingStatus>().map_err(decode_error)?,
            created_at: row.try_get("created_at")?,
        })
    }
}

fn decode_error(message: String) -> BookingError {
    BookingError::Database(sqlx::Error::Decode(message.into()))
}

#[async_trait]
impl BookingStore for PostgresBookingStore {
    async fn insert(&self, booking: Booking) -> Result<Booking> {
        sqlx::query(
            r#"
            INSERT INTO bookings (id, user_id, kind, flight_code, hotel_name, passenger_name, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(booking.id.as_uuid())
        .bind(booking.user_id.as_uuid())
        .bind(booking.kind.as_str())
        .bind(booking.flight_code.as_deref())
        .bind(booking.hotel_name.as_deref())
        .bind(&booking.passenger_name)
        .bind(booking.status.as_str())
        .bind(booking.created_at)
        .execute(&self.pool)
        .await?;

        Ok(booking)
    }

    async fn find(&self, id: BookingId) -> Result<Option<Booking>> {
        let row = sqlx::query(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_booking).transpose()
    }

    async fn delete(&self, id: BookingId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_status(&self, id: BookingId, status: BookingStatus) -> Result<Option<Booking>> {
        let row = sqlx::query(&format!(
            "UPDATE bookings SET status = $2 WHERE id = $1 RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(id.as_uuid())
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_booking).transpose()
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Booking>> {
        let rows = sqlx::query(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE user_id = $1 ORDER BY created_at DESC, id"
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_booking).collect()
    }
}
