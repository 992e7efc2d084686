//! Catalog error types.

use common::HotelId;
use thiserror::Error;

/// Errors that can occur in hotel and promo operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Hotel not found: {0}")]
    HotelNotFound(HotelId),

    /// The code does not match any promo.
    #[error("Invalid promo code: {0}")]
    InvalidPromoCode(String),

    /// The promo exists but has expired.
    #[error("Promo no longer active: {0}")]
    PromoInactive(String),

    #[error("Promo code already exists: {0}")]
    PromoCodeTaken(String),

    /// A required field is missing or malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
