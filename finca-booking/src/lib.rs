pub mod calculator;
pub mod validation;
pub mod manager;

pub use calculator::{nights_between, nights_between_str, parse_stay_date, quote, total_price};
pub use validation::{collect_validation_errors, validate_booking_request, ValidatedBooking, ValidationError};
pub use manager::{BookingError, BookingManager, BookingRules};
