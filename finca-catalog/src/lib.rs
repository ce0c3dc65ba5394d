pub mod catalog;
pub mod layout;

pub use catalog::{seed_studios, CatalogError, StudioCatalog};
pub use layout::{
    layout_amphitheater, layout_seats, AmphitheaterConfig, SeatPosition, SeatRing, TieredSeatPosition,
};
