use serde::{Deserialize, Serialize};

pub type StudioId = u32;

/// A bookable unit in the guesthouse catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudioUnit {
    pub id: StudioId,
    pub name: String,
    pub description: String,
    /// Nightly rate. Serialized as `price` to keep the mobile app's contract.
    #[serde(rename = "price", alias = "pricePerNight")]
    pub price_per_night: f64,
    /// Maximum number of guests.
    pub capacity: u32,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub available: bool,
}

impl StudioUnit {
    pub fn new(id: StudioId, name: &str, description: &str, price_per_night: f64, capacity: u32) -> Self {
        Self {
            id,
            name: name.to_string(),
            description: description.to_string(),
            price_per_night,
            capacity,
            amenities: Vec::new(),
            image_url: None,
            available: true,
        }
    }

    pub fn with_amenities(mut self, amenities: &[&str]) -> Self {
        self.amenities = amenities.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn fits(&self, guests: u32) -> bool {
        guests <= self.capacity
    }
}
