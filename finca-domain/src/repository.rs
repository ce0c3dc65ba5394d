use async_trait::async_trait;
use crate::booking::{BookingDraft, BookingStatus, ConfirmedBooking};
use crate::studio::{StudioId, StudioUnit};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Record not found: {0}")]
    NotFound(String),

    /// The stored booking no longer has the status the caller read.
    #[error("Booking {id} is now {current}")]
    StatusChanged { id: String, current: BookingStatus },

    #[error("Storage failure: {0}")]
    Storage(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Read-only access to the studio catalog
#[async_trait]
pub trait StudioRepository: Send + Sync {
    async fn list(&self) -> RepositoryResult<Vec<StudioUnit>>;

    async fn get(&self, id: StudioId) -> RepositoryResult<Option<StudioUnit>>;
}

/// Booking storage. The store owns id assignment.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn list(&self) -> RepositoryResult<Vec<ConfirmedBooking>>;

    async fn get(&self, id: &str) -> RepositoryResult<Option<ConfirmedBooking>>;

    async fn insert(&self, draft: BookingDraft) -> RepositoryResult<ConfirmedBooking>;

    /// Replace a stored booking if its stored status is still `expected`.
    ///
    /// The check and the write happen atomically. Fails with `NotFound` when
    /// the id is unknown and `StatusChanged` when another writer got there first.
    async fn update(&self, booking: ConfirmedBooking, expected: BookingStatus) -> RepositoryResult<ConfirmedBooking>;
}
