use std::sync::Arc;
use tracing::{debug, info, warn};
use finca_domain::{
    BookingDraft, BookingRepository, BookingRequest, BookingStatus, ConfirmedBooking, NewBooking, Quote,
    RepositoryError, StudioId, StudioRepository, StudioUnit,
};
use crate::calculator::{self, nights_between_str, to_cents, total_price};
use crate::validation::ValidationError;

/// Server-side acceptance policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingRules {
    /// Reject stays whose check-out is not after check-in.
    pub strict_date_range: bool,
    /// Accept new bookings immediately instead of leaving them pending.
    pub auto_confirm: bool,
}

impl Default for BookingRules {
    fn default() -> Self {
        Self {
            strict_date_range: false,
            auto_confirm: true,
        }
    }
}

/// Applies the backend booking rules and lifecycle over injected repositories.
pub struct BookingManager {
    studios: Arc<dyn StudioRepository>,
    bookings: Arc<dyn BookingRepository>,
    rules: BookingRules,
}

impl BookingManager {
    pub fn new(
        studios: Arc<dyn StudioRepository>,
        bookings: Arc<dyn BookingRepository>,
        rules: BookingRules,
    ) -> Self {
        Self { studios, bookings, rules }
    }

    pub async fn list_studios(&self) -> Result<Vec<StudioUnit>, BookingError> {
        Ok(self.studios.list().await?)
    }

    pub async fn get_studio(&self, id: StudioId) -> Result<StudioUnit, BookingError> {
        self.studios.get(id).await?.ok_or(BookingError::StudioNotFound)
    }

    pub async fn list_bookings(&self) -> Result<Vec<ConfirmedBooking>, BookingError> {
        Ok(self.bookings.list().await?)
    }

    pub async fn get_booking(&self, id: &str) -> Result<ConfirmedBooking, BookingError> {
        self.bookings
            .get(id)
            .await?
            .ok_or_else(|| BookingError::BookingNotFound(id.to_string()))
    }

    /// Full form validation plus pricing, without storing anything.
    pub async fn quote(&self, request: &BookingRequest) -> Result<Quote, BookingError> {
        let studio = self.get_studio(request.studio_id).await?;
        Ok(calculator::quote(request, &studio)?)
    }

    /// Accept a booking submitted over the API.
    ///
    /// Checks are looser than the form's: required fields, known studio and
    /// capacity; the date order only when `strict_date_range` is set. The
    /// stored price is always recomputed from the catalog.
    pub async fn create_booking(&self, body: NewBooking) -> Result<ConfirmedBooking, BookingError> {
        let request = required_fields(&body).ok_or(BookingError::MissingFields)?;
        let studio = self.get_studio(request.studio_id).await?;

        if !studio.fits(request.guest_count) {
            warn!(
                "Rejected booking for studio {}: {} guests over capacity {}",
                studio.id, request.guest_count, studio.capacity
            );
            return Err(BookingError::CapacityExceeded { limit: studio.capacity });
        }

        let nights = nights_between_str(&request.check_in_date, &request.check_out_date);
        if self.rules.strict_date_range && nights == 0 {
            return Err(BookingError::InvalidDateRange);
        }

        let price = total_price(nights, studio.price_per_night);
        if let Some(claimed) = body.total_price {
            if to_cents(claimed) != to_cents(price) {
                debug!("Client price {} differs from computed {} for studio {}", claimed, price, studio.id);
            }
        }

        let mut status = BookingStatus::Pending;
        if self.rules.auto_confirm {
            status = transition(status, BookingStatus::Confirmed)?;
        }

        let booking = self
            .bookings
            .insert(BookingDraft {
                studio_id: studio.id,
                guest_name: request.guest_name,
                guest_email: request.guest_email,
                guest_phone: request.guest_phone,
                check_in: request.check_in_date,
                check_out: request.check_out_date,
                guests: request.guest_count,
                total_price: price,
                status,
            })
            .await?;

        info!("Booking {} created for studio {} ({})", booking.id, booking.studio_id, booking.status);
        Ok(booking)
    }

    /// Transition: Pending → Confirmed
    pub async fn confirm_booking(&self, id: &str) -> Result<ConfirmedBooking, BookingError> {
        let booking = self.move_to(id, BookingStatus::Confirmed).await?;
        info!("Booking confirmed: {}", booking.id);
        Ok(booking)
    }

    /// Transition: Pending/Confirmed → Cancelled. Cancelling twice is a no-op.
    pub async fn cancel_booking(&self, id: &str) -> Result<ConfirmedBooking, BookingError> {
        let booking = self.move_to(id, BookingStatus::Cancelled).await?;
        info!("Booking cancelled: {}", booking.id);
        Ok(booking)
    }

    /// Read, check and write back a status change.
    ///
    /// The store only accepts the write if nobody changed the status since the
    /// read; otherwise the transition is re-checked against the fresh status.
    /// Statuses only move forward, so this settles after a couple of rounds.
    async fn move_to(&self, id: &str, to: BookingStatus) -> Result<ConfirmedBooking, BookingError> {
        loop {
            let mut booking = self.get_booking(id).await?;
            if to == BookingStatus::Cancelled && booking.status == to {
                debug!("Booking {} already cancelled", id);
                return Ok(booking);
            }

            let from = booking.status;
            booking.status = transition(from, to)?;

            match self.bookings.update(booking, from).await {
                Err(RepositoryError::StatusChanged { current, .. }) => {
                    debug!("Booking {} moved to {} concurrently, re-checking", id, current);
                }
                result => return Ok(result?),
            }
        }
    }
}

fn transition(from: BookingStatus, to: BookingStatus) -> Result<BookingStatus, BookingError> {
    if from.can_transition_to(to) {
        Ok(to)
    } else {
        Err(BookingError::InvalidTransition { from, to })
    }
}

fn present(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

/// The API treats absent, empty and zero values alike.
fn required_fields(body: &NewBooking) -> Option<BookingRequest> {
    Some(BookingRequest {
        studio_id: body.studio_id.filter(|id| *id > 0)?,
        guest_name: present(&body.guest_name)?,
        guest_email: present(&body.guest_email)?,
        guest_phone: present(&body.guest_phone)?,
        check_in_date: present(&body.check_in)?,
        check_out_date: present(&body.check_out)?,
        guest_count: body.guests.filter(|g| *g > 0)?,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Studio not found")]
    StudioNotFound,

    #[error("Booking not found")]
    BookingNotFound(String),

    #[error("Studio capacity is {limit} guests")]
    CapacityExceeded { limit: u32 },

    #[error("Check-out date must be after check-in date")]
    InvalidDateRange,

    #[error("Invalid state transition from {from} to {to}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use finca_catalog::StudioCatalog;
    use finca_store::{InMemoryBookingRepository, InMemoryStudioRepository};

    fn manager(rules: BookingRules) -> BookingManager {
        BookingManager::new(
            Arc::new(InMemoryStudioRepository::new(StudioCatalog::seeded())),
            Arc::new(InMemoryBookingRepository::new()),
            rules,
        )
    }

    fn body(studio_id: StudioId, check_in: &str, check_out: &str, guests: u32) -> NewBooking {
        NewBooking {
            studio_id: Some(studio_id),
            guest_name: Some("Ana Perez".to_string()),
            guest_email: Some("ana@example.com".to_string()),
            guest_phone: Some("555-0101".to_string()),
            check_in: Some(check_in.to_string()),
            check_out: Some(check_out.to_string()),
            guests: Some(guests),
            total_price: None,
        }
    }

    #[tokio::test]
    async fn test_create_booking_lifecycle() {
        let manager = manager(BookingRules::default());

        let booking = manager.create_booking(body(3, "2024-03-15", "2024-03-18", 2)).await.unwrap();
        assert_eq!(booking.id, "1");
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.total_price, 240.0);

        let second = manager.create_booking(body(4, "2024-04-01", "2024-04-02", 4)).await.unwrap();
        assert_eq!(second.id, "2");

        let cancelled = manager.cancel_booking("1").await.unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);
        assert_eq!(manager.get_booking("1").await.unwrap().status, BookingStatus::Cancelled);

        // Idempotent
        let again = manager.cancel_booking("1").await.unwrap();
        assert_eq!(again.status, BookingStatus::Cancelled);
        assert_eq!(manager.list_bookings().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_fields() {
        let manager = manager(BookingRules::default());

        let mut missing_phone = body(3, "2024-03-15", "2024-03-18", 2);
        missing_phone.guest_phone = Some(String::new());
        assert!(matches!(manager.create_booking(missing_phone).await, Err(BookingError::MissingFields)));

        let mut no_guests = body(3, "2024-03-15", "2024-03-18", 2);
        no_guests.guests = Some(0);
        assert!(matches!(manager.create_booking(no_guests).await, Err(BookingError::MissingFields)));

        assert!(matches!(
            manager.create_booking(NewBooking::default()).await,
            Err(BookingError::MissingFields)
        ));
    }

    #[tokio::test]
    async fn test_unknown_studio_and_capacity() {
        let manager = manager(BookingRules::default());

        let err = manager.create_booking(body(99, "2024-03-15", "2024-03-18", 2)).await.unwrap_err();
        assert!(matches!(err, BookingError::StudioNotFound));

        let err = manager.create_booking(body(3, "2024-03-15", "2024-03-18", 3)).await.unwrap_err();
        assert!(matches!(err, BookingError::CapacityExceeded { limit: 2 }));
        assert_eq!(err.to_string(), "Studio capacity is 2 guests");
        assert!(manager.list_bookings().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_date_range_only_checked_when_strict() {
        let loose = manager(BookingRules::default());
        let booking = loose.create_booking(body(1, "2024-03-20", "2024-03-15", 1)).await.unwrap();
        assert_eq!(booking.total_price, 0.0);

        let strict = manager(BookingRules {
            strict_date_range: true,
            ..BookingRules::default()
        });
        let err = strict.create_booking(body(1, "2024-03-20", "2024-03-15", 1)).await.unwrap_err();
        assert!(matches!(err, BookingError::InvalidDateRange));
    }

    #[tokio::test]
    async fn test_client_price_is_recomputed() {
        let manager = manager(BookingRules::default());
        let mut tampered = body(5, "2024-05-01", "2024-05-03", 3);
        tampered.total_price = Some(1.0);

        let booking = manager.create_booking(tampered).await.unwrap();
        assert_eq!(booking.total_price, 240.0);
    }

    #[tokio::test]
    async fn test_pending_bookings_need_confirmation() {
        let manager = manager(BookingRules {
            auto_confirm: false,
            ..BookingRules::default()
        });

        let booking = manager.create_booking(body(2, "2024-06-01", "2024-06-04", 2)).await.unwrap();
        assert_eq!(booking.status, BookingStatus::Pending);

        let confirmed = manager.confirm_booking(&booking.id).await.unwrap();
        assert_eq!(confirmed.status, BookingStatus::Confirmed);

        // Confirmed → Confirmed is not a transition
        let err = manager.confirm_booking(&booking.id).await.unwrap_err();
        assert!(matches!(
            err,
            BookingError::InvalidTransition { from: BookingStatus::Confirmed, to: BookingStatus::Confirmed }
        ));

        manager.cancel_booking(&booking.id).await.unwrap();
        assert!(manager.confirm_booking(&booking.id).await.is_err());
    }

    /// Holds the first two reads until both have happened, so two status
    /// changes start from the same snapshot.
    struct LockstepReads {
        inner: InMemoryBookingRepository,
        barrier: tokio::sync::Barrier,
        reads: std::sync::atomic::AtomicUsize,
    }

    #[async_trait::async_trait]
    impl BookingRepository for LockstepReads {
        async fn list(&self) -> finca_domain::RepositoryResult<Vec<ConfirmedBooking>> {
            self.inner.list().await
        }

        async fn get(&self, id: &str) -> finca_domain::RepositoryResult<Option<ConfirmedBooking>> {
            let booking = self.inner.get(id).await;
            if self.reads.fetch_add(1, std::sync::atomic::Ordering::SeqCst) < 2 {
                self.barrier.wait().await;
            }
            booking
        }

        async fn insert(&self, draft: BookingDraft) -> finca_domain::RepositoryResult<ConfirmedBooking> {
            self.inner.insert(draft).await
        }

        async fn update(
            &self,
            booking: ConfirmedBooking,
            expected: BookingStatus,
        ) -> finca_domain::RepositoryResult<ConfirmedBooking> {
            self.inner.update(booking, expected).await
        }
    }

    #[tokio::test]
    async fn test_concurrent_confirm_and_cancel() {
        let repo = Arc::new(LockstepReads {
            inner: InMemoryBookingRepository::new(),
            barrier: tokio::sync::Barrier::new(2),
            reads: std::sync::atomic::AtomicUsize::new(0),
        });
        let manager = BookingManager::new(
            Arc::new(InMemoryStudioRepository::new(StudioCatalog::seeded())),
            repo.clone(),
            BookingRules {
                auto_confirm: false,
                ..BookingRules::default()
            },
        );

        let booking = manager.create_booking(body(2, "2024-06-01", "2024-06-04", 2)).await.unwrap();
        assert_eq!(booking.status, BookingStatus::Pending);

        let (cancelled, confirmed) =
            tokio::join!(manager.cancel_booking(&booking.id), manager.confirm_booking(&booking.id));

        // Either order is fine, but a cancelled booking never comes back
        assert_eq!(cancelled.unwrap().status, BookingStatus::Cancelled);
        if let Err(err) = confirmed {
            assert!(matches!(
                err,
                BookingError::InvalidTransition { from: BookingStatus::Cancelled, to: BookingStatus::Confirmed }
            ));
        }
        assert_eq!(manager.get_booking(&booking.id).await.unwrap().status, BookingStatus::Cancelled);
        assert_eq!(repo.reads.load(std::sync::atomic::Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_unknown_booking() {
        let manager = manager(BookingRules::default());
        assert!(matches!(manager.get_booking("42").await, Err(BookingError::BookingNotFound(_))));
        assert!(matches!(manager.cancel_booking("42").await, Err(BookingError::BookingNotFound(_))));
    }

    #[tokio::test]
    async fn test_quote_uses_form_validation() {
        let manager = manager(BookingRules::default());
        let request = BookingRequest {
            studio_id: 3,
            guest_name: "Ana".to_string(),
            guest_email: "ana@example.com".to_string(),
            guest_phone: "555".to_string(),
            check_in_date: "2024-03-20".to_string(),
            check_out_date: "2024-03-15".to_string(),
            guest_count: 2,
        };
        let err = manager.quote(&request).await.unwrap_err();
        assert!(matches!(err, BookingError::Validation(ValidationError::InvalidDateRange)));

        let request = BookingRequest {
            check_in_date: "2024-03-15".to_string(),
            check_out_date: "2024-03-18".to_string(),
            ..request
        };
        assert_eq!(manager.quote(&request).await.unwrap().total_price, 240.0);
    }
}
