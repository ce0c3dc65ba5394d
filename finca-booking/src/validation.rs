use chrono::NaiveDate;
use finca_domain::{BookingRequest, StudioUnit};
use crate::calculator::{nights_between, parse_stay_date, total_price};

/// Input errors the guest can fix in the booking form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("This studio can accommodate up to {limit} guests")]
    CapacityExceeded { limit: u32 },

    #[error("Check-out date must be after check-in date")]
    InvalidDateRange,

    #[error("This studio is not available for booking")]
    StudioUnavailable,
}

/// A request that passed every check, with its stay length and price.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedBooking {
    pub request: BookingRequest,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: u32,
    pub total_price: f64,
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn has_missing_fields(request: &BookingRequest) -> bool {
    [
        &request.guest_name,
        &request.guest_email,
        &request.guest_phone,
        &request.check_in_date,
        &request.check_out_date,
    ]
    .iter()
    .any(|field| is_blank(field))
        || request.guest_count == 0
}

/// Parsed dates and night count, or `None` when the range is empty or unparseable.
fn stay_range(request: &BookingRequest) -> Option<(NaiveDate, NaiveDate, u32)> {
    let check_in = parse_stay_date(&request.check_in_date)?;
    let check_out = parse_stay_date(&request.check_out_date)?;
    let nights = nights_between(check_in, check_out);
    (nights > 0).then_some((check_in, check_out, nights))
}

/// Check a form submission against a studio, reporting the first failure.
///
/// Order: required fields, capacity, date range, availability.
pub fn validate_booking_request(
    request: &BookingRequest,
    studio: &StudioUnit,
) -> Result<ValidatedBooking, ValidationError> {
    if has_missing_fields(request) {
        return Err(ValidationError::MissingFields);
    }

    if !studio.fits(request.guest_count) {
        return Err(ValidationError::CapacityExceeded { limit: studio.capacity });
    }

    let (check_in, check_out, nights) = stay_range(request).ok_or(ValidationError::InvalidDateRange)?;

    if !studio.available {
        return Err(ValidationError::StudioUnavailable);
    }

    Ok(ValidatedBooking {
        request: request.clone(),
        check_in,
        check_out,
        nights,
        total_price: total_price(nights, studio.price_per_night),
    })
}

/// Every failing rule, in the same order as [`validate_booking_request`].
pub fn collect_validation_errors(request: &BookingRequest, studio: &StudioUnit) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if has_missing_fields(request) {
        errors.push(ValidationError::MissingFields);
    }
    if !studio.fits(request.guest_count) {
        errors.push(ValidationError::CapacityExceeded { limit: studio.capacity });
    }
    if stay_range(request).is_none() {
        errors.push(ValidationError::InvalidDateRange);
    }
    if !studio.available {
        errors.push(ValidationError::StudioUnavailable);
    }

    errors
}
