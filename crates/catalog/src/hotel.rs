use chrono::{DateTime, Utc};
use common::{Amount, HotelId};
use serde::{Deserialize, Serialize};

/// Rating given to hotels added without one.
pub const DEFAULT_RATING: f64 = 4.5;

/// Stock photo used when a hotel is added without an image.
pub const DEFAULT_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1566073771259-6a8506099945?auto=format&fit=crop&w=800&q=80";

/// A hotel listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: HotelId,
    pub name: String,
    pub location: String,
    pub price_per_night: Amount,
    pub rating: f64,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

/// Request to add a hotel.
#[derive(Debug, Clone, Deserialize)]
pub struct NewHotel {
    pub name: String,
    pub location: String,
    pub price_per_night: Amount,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Hotel {
    /// Builds a hotel from an add request, filling in defaults.
    pub fn from_request(req: NewHotel) -> Self {
        Self {
            id: HotelId::new(),
            name: req.name.trim().to_string(),
            location: req.location.trim().to_string(),
            price_per_night: req.price_per_night,
            rating: DEFAULT_RATING,
            image_url: req
                .image_url
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string()),
            created_at: Utc::now(),
        }
    }
}
