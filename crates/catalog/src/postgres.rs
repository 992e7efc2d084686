use async_trait::async_trait;
use common::{Amount, HotelId, PromoId};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::error::{CatalogError, Result};
use crate::hotel::Hotel;
use crate::promo::{Promo, PromoStatus};
use crate::store::{HotelStore, PromoStore};

const HOTEL_COLUMNS: &str = "id, name, location, price_per_night, rating, image_url, created_at";
const PROMO_COLUMNS: &str = "id, code, discount, status, created_at";
const PROMO_CODE_CONSTRAINT: &str = "promos_code_key";

/// PostgreSQL-backed hotel catalog.
#[derive(Clone)]
pub struct PostgresHotelStore {
    pool: PgPool,
}

impl PostgresHotelStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_hotel(row: &PgRow) -> Result<Hotel> {
        Ok(Hotel {
            id: HotelId::from_uuid(row.try_get::<Uuid, _>("id")?),
            name: row.try_get("name")?,
            location: row.try_get("location")?,
            price_per_night: Amount::new(row.try_get("price_per_night")?),
            rating: row.try_get("rating")?,
            image_url: row.try_get("image_url")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl HotelStore for PostgresHotelStore {
    async fn list_hotels(&self) -> Result<Vec<Hotel>> {
        let rows = sqlx::query(&format!(
            "SELECT {HOTEL_COLUMNS} FROM hotels ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_hotel).collect()
    }

    async fn find_hotel(&self, id: HotelId) -> Result<Option<Hotel>> {
        let row = sqlx::query(&format!("SELECT {HOTEL_COLUMNS} FROM hotels WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_hotel).transpose()
    }

    async fn insert_hotel(&self, hotel: Hotel) -> Result<Hotel> {
        sqlx::query(
            r#"
            INSERT INTO hotels (id, name, location, price_per_night, rating, image_url, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(hotel.id.as_uuid())
        .bind(&hotel.name)
        .bind(&hotel.location)
        .bind(hotel.price_per_night.value())
        .bind(hotel.rating)
        .bind(&hotel.image_url)
        .bind(hotel.created_at)
        .execute(&self.pool)
        .await?;

        Ok(hotel)
    }

    async fn update_image(&self, id: HotelId, image_url: &str) -> Result<Option<Hotel>> {
        let row = sqlx::query(&format!(
            "UPDATE hotels SET image_url = $2 WHERE id = $1 RETURNING {HOTEL_COLUMNS}"
        ))
        .bind(id.as_uuid())
        .bind(image_url)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_hotel).transpose()
    }
}

/// PostgreSQL-backed promo store.
#[derive(Clone)]
pub struct PostgresPromoStore {
    pool: PgPool,
}

impl PostgresPromoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_promo(row: &PgRow) -> Result<Promo> {
        let status: String = row.try_get("status")?;
        let status = status
            .parse::<PromoStatus>()
            .map_err(|e| CatalogError::Database(sqlx::Error::Decode(e.into())))?;

        Ok(Promo {
            id: PromoId::from_uuid(row.try_get::<Uuid, _>("id")?),
            code: row.try_get("code")?,
            discount: Amount::new(row.try_get("discount")?),
            status,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl PromoStore for PostgresPromoStore {
    async fn list_promos(&self, status: PromoStatus) -> Result<Vec<Promo>> {
        let rows = sqlx::query(&format!(
            "SELECT {PROMO_COLUMNS} FROM promos WHERE status = $1 ORDER BY created_at, id"
        ))
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_promo).collect()
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Promo>> {
        let row = sqlx::query(&format!("SELECT {PROMO_COLUMNS} FROM promos WHERE code = $1"))
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_promo).transpose()
    }

    async fn insert_promo(&self, promo: Promo) -> Result<Promo> {
        sqlx::query(
            r#"
            INSERT INTO promos (id, code, discount, status, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(promo.id.as_uuid())
        .bind(&promo.code)
        .bind(promo.discount.value())
        .bind(promo.status.as_str())
        .bind(promo.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some(PROMO_CODE_CONSTRAINT) =>
            {
                CatalogError::PromoCodeTaken(promo.code.clone())
            }
            other => CatalogError::Database(other),
        })?;

        Ok(promo)
    }

    async fn set_status(&self, code: &str, status: PromoStatus) -> Result<Option<Promo>> {
        let row = sqlx::query(&format!(
            "UPDATE promos SET status = $2 WHERE code = $1 RETURNING {PROMO_COLUMNS}"
        ))
        .bind(code)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_promo).transpose()
    }
}
