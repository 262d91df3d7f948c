use serde::{Deserialize, Serialize};

use super::Entity;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hotel {
    pub name: String,
    pub city: String,
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub price_per_night: f64,
    #[serde(default = "default_rating")]
    pub rating: f64,
}

impl Entity for Hotel {
    const COLLECTION: &'static str = "hotel";
}

pub fn default_rating() -> f64 {
    4.5
}

/// Query parameters for hotel listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HotelSearch {
    pub city: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeedResponse {
    pub status: String,
}
