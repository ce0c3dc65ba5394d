pub mod app_config;
pub mod memory_repo;

pub use memory_repo::{InMemoryBookingRepository, InMemoryStudioRepository};
