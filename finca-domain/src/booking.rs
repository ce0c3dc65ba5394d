use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use std::fmt;
use crate::studio::StudioId;

/// Booking status in the lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    /// Allowed moves: Pending → Confirmed, Pending → Cancelled, Confirmed → Cancelled.
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (BookingStatus::Pending, BookingStatus::Confirmed)
                | (BookingStatus::Pending, BookingStatus::Cancelled)
                | (BookingStatus::Confirmed, BookingStatus::Cancelled)
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// What a guest typed into the booking form, before any validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub studio_id: StudioId,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    #[serde(alias = "checkIn")]
    pub check_in_date: String,
    #[serde(alias = "checkOut")]
    pub check_out_date: String,
    #[serde(alias = "guests")]
    pub guest_count: u32,
}

/// Body of `POST /api/bookings`.
///
/// Every field is optional on the wire so that absent and empty values can both
/// be reported as missing instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub studio_id: Option<StudioId>,
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub guests: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
}

impl NewBooking {
    /// Wire body for a form request, carrying the price the app computed.
    pub fn from_request(req: &BookingRequest, total_price: f64) -> Self {
        Self {
            studio_id: Some(req.studio_id),
            guest_name: Some(req.guest_name.clone()),
            guest_email: Some(req.guest_email.clone()),
            guest_phone: Some(req.guest_phone.clone()),
            check_in: Some(req.check_in_date.clone()),
            check_out: Some(req.check_out_date.clone()),
            guests: Some(req.guest_count),
            total_price: Some(total_price),
        }
    }
}

/// A booking that passed validation but has no id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft {
    pub studio_id: StudioId,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    pub check_in: String,
    pub check_out: String,
    pub guests: u32,
    pub total_price: f64,
    pub status: BookingStatus,
}

impl BookingDraft {
    pub fn into_booking(self, id: String, created_at: DateTime<Utc>) -> ConfirmedBooking {
        ConfirmedBooking {
            id,
            studio_id: self.studio_id,
            guest_name: self.guest_name,
            guest_email: self.guest_email,
            guest_phone: self.guest_phone,
            check_in: self.check_in,
            check_out: self.check_out,
            guests: self.guests,
            total_price: self.total_price,
            status: self.status,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmedBooking {
    pub id: String,
    pub studio_id: StudioId,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    pub check_in: String,
    pub check_out: String,
    pub guests: u32,
    pub total_price: f64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}
