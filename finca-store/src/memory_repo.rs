use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use finca_catalog::StudioCatalog;
use finca_domain::{
    BookingDraft, BookingRepository, BookingStatus, ConfirmedBooking, RepositoryError, RepositoryResult,
    StudioId, StudioRepository, StudioUnit,
};

/// Serves a fixed catalog.
pub struct InMemoryStudioRepository {
    catalog: StudioCatalog,
}

impl InMemoryStudioRepository {
    pub fn new(catalog: StudioCatalog) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl StudioRepository for InMemoryStudioRepository {
    async fn list(&self) -> RepositoryResult<Vec<StudioUnit>> {
        Ok(self.catalog.studios().to_vec())
    }

    async fn get(&self, id: StudioId) -> RepositoryResult<Option<StudioUnit>> {
        Ok(self.catalog.find(id).cloned())
    }
}

struct BookingTable {
    bookings: Vec<ConfirmedBooking>,
    next_id: u64,
}

/// Process-local booking list with a counter for ids ("1", "2", ...).
///
/// Writes go through the lock, so id assignment and status updates are serialized;
/// `update` compares the stored status under the same write guard.
pub struct InMemoryBookingRepository {
    table: RwLock<BookingTable>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(BookingTable {
                bookings: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryBookingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn list(&self) -> RepositoryResult<Vec<ConfirmedBooking>> {
        Ok(self.table.read().await.bookings.clone())
    }

    async fn get(&self, id: &str) -> RepositoryResult<Option<ConfirmedBooking>> {
        let table = self.table.read().await;
        Ok(table.bookings.iter().find(|b| b.id == id).cloned())
    }

    async fn insert(&self, draft: BookingDraft) -> RepositoryResult<ConfirmedBooking> {
        let mut table = self.table.write().await;
        let id = table.next_id.to_string();
        table.next_id += 1;

        let booking = draft.into_booking(id, Utc::now());
        table.bookings.push(booking.clone());
        debug!("Stored booking {} ({} total)", booking.id, table.bookings.len());
        Ok(booking)
    }

    async fn update(&self, booking: ConfirmedBooking, expected: BookingStatus) -> RepositoryResult<ConfirmedBooking> {
        let mut table = self.table.write().await;
        let slot = table
            .bookings
            .iter_mut()
            .find(|b| b.id == booking.id)
            .ok_or_else(|| RepositoryError::NotFound(booking.id.clone()))?;

        if slot.status != expected {
            return Err(RepositoryError::StatusChanged {
                id: booking.id,
                current: slot.status,
            });
        }

        *slot = booking.clone();
        debug!("Updated booking {} -> {}", booking.id, booking.status);
        Ok(booking)
    }
}
