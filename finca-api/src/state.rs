use std::sync::Arc;
use finca_booking::{BookingManager, BookingRules};
use finca_catalog::{SeatRing, StudioCatalog};
use finca_store::app_config::Config;
use finca_store::{InMemoryBookingRepository, InMemoryStudioRepository};

#[derive(Clone)]
pub struct AppState {
    pub bookings: Arc<BookingManager>,
    /// Default dimensions for the seat layout endpoint.
    pub layout: SeatRing,
}

impl AppState {
    /// Backend over an in-memory catalog and booking list.
    pub fn in_memory(catalog: StudioCatalog, rules: BookingRules, layout: SeatRing) -> Self {
        let manager = BookingManager::new(
            Arc::new(InMemoryStudioRepository::new(catalog)),
            Arc::new(InMemoryBookingRepository::new()),
            rules,
        );
        Self {
            bookings: Arc::new(manager),
            layout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let rules = BookingRules {
            strict_date_range: config.business_rules.strict_date_range,
            auto_confirm: config.business_rules.auto_confirm,
        };
        Self::in_memory(StudioCatalog::seeded(), rules, config.layout)
    }
}
