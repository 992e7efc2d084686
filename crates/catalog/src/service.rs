//! Hotel and promo operations.

use std::sync::Arc;

use common::{Amount, HotelId};

use crate::error::{CatalogError, Result};
use crate::hotel::{Hotel, NewHotel};
use crate::promo::{Promo, PromoStatus};
use crate::store::{HotelStore, PromoStore};

/// Service for the hotel catalog.
pub struct HotelService {
    store: Arc<dyn HotelStore>,
}

impl HotelService {
    pub fn new(store: Arc<dyn HotelStore>) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip(self))]
    pub async fn hotels(&self) -> Result<Vec<Hotel>> {
        self.store.list_hotels().await
    }

    #[tracing::instrument(skip(self))]
    pub async fn hotel(&self, id: HotelId) -> Result<Hotel> {
        self.store
            .find_hotel(id)
            .await?
            .ok_or(CatalogError::HotelNotFound(id))
    }

    /// Adds a hotel with the default rating and, if none is given, the
    /// default image.
    #[tracing::instrument(skip(self, req), fields(name = %req.name))]
    pub async fn add_hotel(&self, req: NewHotel) -> Result<Hotel> {
        if req.name.trim().is_empty() {
            return Err(CatalogError::InvalidInput("hotel name is required".to_string()));
        }
        if req.location.trim().is_empty() {
            return Err(CatalogError::InvalidInput(
                "hotel location is required".to_string(),
            ));
        }
        if !req.price_per_night.is_positive() {
            return Err(CatalogError::InvalidInput(format!(
                "price per night must be greater than 0, got {}",
                req.price_per_night
            )));
        }

        let hotel = self.store.insert_hotel(Hotel::from_request(req)).await?;
        metrics::counter!("hotels_added_total").increment(1);
        tracing::info!(hotel_id = %hotel.id, "hotel added");
        Ok(hotel)
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_hotel(&self, id: HotelId, image_url: &str) -> Result<Hotel> {
        let image_url = image_url.trim();
        if image_url.is_empty() {
            return Err(CatalogError::InvalidInput("image URL is required".to_string()));
        }

        self.store
            .update_image(id, image_url)
            .await?
            .ok_or(CatalogError::HotelNotFound(id))
    }
}

/// Service for promo codes.
pub struct PromoService {
    store: Arc<dyn PromoStore>,
}

impl PromoService {
    pub fn new(store: Arc<dyn PromoStore>) -> Self {
        Self { store }
    }

    /// Lists active promos.
    #[tracing::instrument(skip(self))]
    pub async fn promos(&self) -> Result<Vec<Promo>> {
        self.store.list_promos(PromoStatus::Active).await
    }

    /// Looks up a promo that can still be redeemed.
    #[tracing::instrument(skip(self))]
    pub async fn check_promo(&self, code: &str) -> Result<Promo> {
        let code = code.trim();
        let promo = self
            .store
            .find_by_code(code)
            .await?
            .ok_or_else(|| CatalogError::InvalidPromoCode(code.to_string()))?;

        if !promo.is_active() {
            metrics::counter!("promo_checks_rejected_total").increment(1);
            return Err(CatalogError::PromoInactive(promo.code));
        }
        Ok(promo)
    }

    #[tracing::instrument(skip(self))]
    pub async fn create_promo(&self, code: &str, discount: Amount) -> Result<Promo> {
        let code = code.trim();
        if code.is_empty() {
            return Err(CatalogError::InvalidInput("promo code is required".to_string()));
        }
        if !discount.is_positive() {
            return Err(CatalogError::InvalidInput(format!(
                "discount must be greater than 0, got {discount}"
            )));
        }

        let promo = self.store.insert_promo(Promo::new(code, discount)).await?;
        tracing::info!(code = %promo.code, discount = %promo.discount, "promo created");
        Ok(promo)
    }

    #[tracing::instrument(skip(self))]
    pub async fn expire_promo(&self, code: &str) -> Result<Promo> {
        let code = code.trim();
        let promo = self
            .store
            .set_status(code, PromoStatus::Expired)
            .await?
            .ok_or_else(|| CatalogError::InvalidPromoCode(code.to_string()))?;

        tracing::info!(code = %promo.code, "promo expired");
        Ok(promo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hotel::{DEFAULT_IMAGE_URL, DEFAULT_RATING};
    use crate::memory::{InMemoryHotelStore, InMemoryPromoStore};

    fn hotel_service() -> HotelService {
        HotelService::new(Arc::new(InMemoryHotelStore::new()))
    }

    fn promo_service() -> PromoService {
        PromoService::new(Arc::new(InMemoryPromoStore::new()))
    }

    fn new_hotel(name: &str, price: i64) -> NewHotel {
        NewHotel {
            name: name.to_string(),
            location: "Yogyakarta".to_string(),
            price_per_night: Amount::new(price),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn add_and_get_hotel() {
        let service = hotel_service();
        let hotel = service
            .add_hotel(new_hotel("Hotel Tentrem", 750_000))
            .await
            .unwrap();

        assert_eq!(hotel.rating, DEFAULT_RATING);
        assert_eq!(hotel.image_url, DEFAULT_IMAGE_URL);
        assert_eq!(service.hotel(hotel.id).await.unwrap(), hotel);
        assert_eq!(service.hotels().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn add_hotel_validates() {
        let service = hotel_service();
        assert!(matches!(
            service.add_hotel(new_hotel("", 750_000)).await,
            Err(CatalogError::InvalidInput(_))
        ));
        assert!(matches!(
            service.add_hotel(new_hotel("Hotel", 0)).await,
            Err(CatalogError::InvalidInput(_))
        ));
        assert!(service.hotels().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_hotel_image() {
        let service = hotel_service();
        let hotel = service.add_hotel(new_hotel("Hotel", 500_000)).await.unwrap();

        let updated = service
            .update_hotel(hotel.id, "https://img.example.com/h.jpg")
            .await
            .unwrap();
        assert_eq!(updated.image_url, "https://img.example.com/h.jpg");
        assert_eq!(updated.name, hotel.name);

        let missing = HotelId::new();
        assert!(matches!(
            service.update_hotel(missing, "https://x").await,
            Err(CatalogError::HotelNotFound(id)) if id == missing
        ));
    }

    #[tokio::test]
    async fn check_promo_states() {
        let service = promo_service();
        service
            .create_promo("MUDIK", Amount::new(100_000))
            .await
            .unwrap();

        let promo = service.check_promo("MUDIK").await.unwrap();
        assert_eq!(promo.discount, Amount::new(100_000));

        assert!(matches!(
            service.check_promo("NOPE").await,
            Err(CatalogError::InvalidPromoCode(_))
        ));

        service.expire_promo("MUDIK").await.unwrap();
        assert!(matches!(
            service.check_promo("MUDIK").await,
            Err(CatalogError::PromoInactive(_))
        ));
        assert!(service.promos().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_promo_validates() {
        let service = promo_service();
        assert!(matches!(
            service.create_promo("FREE", Amount::zero()).await,
            Err(CatalogError::InvalidInput(_))
        ));
        assert!(matches!(
            service.create_promo("  ", Amount::new(10)).await,
            Err(CatalogError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn expire_unknown_promo() {
        let service = promo_service();
        assert!(matches!(
            service.expire_promo("GHOST").await,
            Err(CatalogError::InvalidPromoCode(_))
        ));
    }
}
