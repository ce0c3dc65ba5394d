use chrono::NaiveDate;
use finca_domain::{BookingRequest, Quote, StudioUnit};
use crate::validation::{validate_booking_request, ValidationError};

/// Calendar date format used by the booking form and the API.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_stay_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Whole nights between two calendar dates. Zero when check-out is not after check-in.
pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> u32 {
    let days = check_out.signed_duration_since(check_in).num_days();
    if days <= 0 {
        return 0;
    }
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// Same as [`nights_between`] for form strings. Unparseable dates give zero nights.
pub fn nights_between_str(check_in: &str, check_out: &str) -> u32 {
    match (parse_stay_date(check_in), parse_stay_date(check_out)) {
        (Some(start), Some(end)) => nights_between(start, end),
        _ => 0,
    }
}

pub fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

pub fn from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Price of a stay. The nightly rate is rounded to cents first and the
/// product is taken in integer cents.
pub fn total_price(nights: u32, price_per_night: f64) -> f64 {
    if nights == 0 {
        return 0.0;
    }
    from_cents(to_cents(price_per_night).saturating_mul(i64::from(nights)))
}

/// Validate a request and summarize its price.
pub fn quote(request: &BookingRequest, studio: &StudioUnit) -> Result<Quote, ValidationError> {
    let validated = validate_booking_request(request, studio)?;
    Ok(Quote {
        studio_id: studio.id,
        nights: validated.nights,
        price_per_night: studio.price_per_night,
        total_price: validated.total_price,
    })
}
