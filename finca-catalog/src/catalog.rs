use std::collections::HashSet;
use finca_domain::{StudioId, StudioUnit};

/// Immutable snapshot of the bookable studios.
#[derive(Debug, Clone, Default)]
pub struct StudioCatalog {
    studios: Vec<StudioUnit>,
}

impl StudioCatalog {
    /// Build a catalog, rejecting duplicate ids. Input order is kept.
    pub fn new(studios: Vec<StudioUnit>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for studio in &studios {
            if studio.id == 0 {
                return Err(CatalogError::InvalidId(studio.name.clone()));
            }
            if !seen.insert(studio.id) {
                return Err(CatalogError::DuplicateId(studio.id));
            }
        }
        Ok(Self { studios })
    }

    /// The catalog the demo backend ships with.
    pub fn seeded() -> Self {
        Self { studios: seed_studios() }
    }

    pub fn studios(&self) -> &[StudioUnit] {
        &self.studios
    }

    pub fn find(&self, id: StudioId) -> Option<&StudioUnit> {
        self.studios.iter().find(|s| s.id == id)
    }

    pub fn available(&self) -> impl Iterator<Item = &StudioUnit> {
        self.studios.iter().filter(|s| s.available)
    }

    pub fn len(&self) -> usize {
        self.studios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.studios.is_empty()
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CatalogError {
    #[error("Duplicate studio id: {0}")]
    DuplicateId(StudioId),

    #[error("Studio {0} must have a positive id")]
    InvalidId(String),
}

pub fn seed_studios() -> Vec<StudioUnit> {
    vec![
        StudioUnit::new(1, "🐦 Sparrow", "Budget-friendly studio", 60.0, 2)
            .with_amenities(&["WiFi", "Kitchenette", "Fan", "TV"]),
        StudioUnit::new(2, "🐦 Robin", "Cozy studio perfect for couples", 70.0, 2)
            .with_amenities(&["WiFi", "Kitchenette", "Air Conditioning", "TV"]),
        StudioUnit::new(3, "🦅 Falcon", "Spacious studio with mountain view", 80.0, 2)
            .with_amenities(&["WiFi", "Kitchen", "Air Conditioning", "TV", "Private Bathroom"]),
        StudioUnit::new(4, "🦅 Hawk", "Large studio ideal for families", 100.0, 4)
            .with_amenities(&["WiFi", "Full Kitchen", "Air Conditioning", "TV", "Balcony"]),
        StudioUnit::new(5, "🦅 Eagle", "Luxury studio with all amenities", 120.0, 3)
            .with_amenities(&["WiFi", "Full Kitchen", "Air Conditioning", "Smart TV", "Balcony", "Jacuzzi"]),
    ]
}
