//! Hotel catalog and promo codes.
//!
//! Both are plain read-mostly collections. Promos are consulted by checkout
//! to discount a booking price before the wallet is debited.

pub mod error;
pub mod hotel;
pub mod memory;
pub mod postgres;
pub mod promo;
pub mod service;
pub mod store;

pub use error::{CatalogError, Result};
pub use hotel::{Hotel, NewHotel};
pub use memory::{InMemoryHotelStore, InMemoryPromoStore};
pub use postgres::{PostgresHotelStore, PostgresPromoStore};
pub use promo::{Promo, PromoStatus};
pub use service::{HotelService, PromoService};
pub use store::{HotelStore, PromoStore};
