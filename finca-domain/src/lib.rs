pub mod studio;
pub mod booking;
pub mod repository;
pub mod wire;

pub use studio::{StudioId, StudioUnit};
pub use booking::{BookingDraft, BookingRequest, BookingStatus, ConfirmedBooking, NewBooking};
pub use wire::{CancellationResponse, ErrorBody, Quote, WelcomeResponse};
pub use repository::{BookingRepository, RepositoryError, RepositoryResult, StudioRepository};
