use async_trait::async_trait;
use common::HotelId;

use crate::error::Result;
use crate::hotel::Hotel;
use crate::promo::{Promo, PromoStatus};

/// Persistence for the hotel catalog.
#[async_trait]
pub trait HotelStore: Send + Sync {
    /// Returns all hotels, oldest first.
    async fn list_hotels(&self) -> Result<Vec<Hotel>>;

    async fn find_hotel(&self, id: HotelId) -> Result<Option<Hotel>>;

    async fn insert_hotel(&self, hotel: Hotel) -> Result<Hotel>;

    /// Replaces a hotel's image URL. Returns `None` if the hotel is unknown.
    async fn update_image(&self, id: HotelId, image_url: &str) -> Result<Option<Hotel>>;
}

/// Persistence for promo codes.
#[async_trait]
pub trait PromoStore: Send + Sync {
    /// Returns promos with the given status, oldest first.
    async fn list_promos(&self, status: PromoStatus) -> Result<Vec<Promo>>;

    async fn find_by_code(&self, code: &str) -> Result<Option<Promo>>;

    /// Inserts a promo. Fails with `PromoCodeTaken` on a duplicate code.
    async fn insert_promo(&self, promo: Promo) -> Result<Promo>;

    /// Sets a promo's status. Returns `None` if the code is unknown.
    async fn set_status(&self, code: &str, status: PromoStatus) -> Result<Option<Promo>>;
}
