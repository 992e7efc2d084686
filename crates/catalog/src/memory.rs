use std::sync::Arc;

use async_trait::async_trait;
use common::HotelId;
use tokio::sync::RwLock;

use crate::error::{CatalogError, Result};
use crate::hotel::Hotel;
use crate::promo::{Promo, PromoStatus};
use crate::store::{HotelStore, PromoStore};

/// In-memory hotel catalog. Keeps insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHotelStore {
    hotels: Arc<RwLock<Vec<Hotel>>>,
}

impl InMemoryHotelStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HotelStore for InMemoryHotelStore {
    async fn list_hotels(&self) -> Result<Vec<Hotel>> {
        Ok(self.hotels.read().await.clone())
    }

    async fn find_hotel(&self, id: HotelId) -> Result<Option<Hotel>> {
        let hotels = self.hotels.read().await;
        Ok(hotels.iter().find(|h| h.id == id).cloned())
    }

    async fn insert_hotel(&self, hotel: Hotel) -> Result<Hotel> {
        self.hotels.write().await.push(hotel.clone());
        Ok(hotel)
    }

    async fn update_image(&self, id: HotelId, image_url: &str) -> Result<Option<Hotel>> {
        let mut hotels = self.hotels.write().await;
        Ok(hotels.iter_mut().find(|h| h.id == id).map(|hotel| {
            hotel.image_url = image_url.to_string();
            hotel.clone()
        }))
    }
}

/// In-memory promo store. Keeps insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPromoStore {
    promos: Arc<RwLock<Vec<Promo>>>,
}

impl InMemoryPromoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PromoStore for InMemoryPromoStore {
    async fn list_promos(&self, status: PromoStatus) -> Result<Vec<Promo>> {
        let promos = self.promos.read().await;
        Ok(promos.iter().filter(|p| p.status == status).cloned().collect())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Promo>> {
        let promos = self.promos.read().await;
        Ok(promos.iter().find(|p| p.code == code).cloned())
    }

    async fn insert_promo(&self, promo: Promo) -> Result<Promo> {
        let mut promos = self.promos.write().await;
        if promos.iter().any(|p| p.code == promo.code) {
            return Err(CatalogError::PromoCodeTaken(promo.code));
        }
        promos.push(promo.clone());
        Ok(promo)
    }

    async fn set_status(&self, code: &str, status: PromoStatus) -> Result<Option<Promo>> {
        let mut promos = self.promos.write().await;
        Ok(promos.iter_mut().find(|p| p.code == code).map(|promo| {
            promo.status = status;
            promo.clone()
        }))
    }
}
