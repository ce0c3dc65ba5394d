//! Response bodies shared by the backend and the client.

use serde::{Deserialize, Serialize};
use crate::booking::ConfirmedBooking;
use crate::studio::StudioId;

/// Body of every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CancellationResponse {
    pub message: String,
    pub booking: ConfirmedBooking,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WelcomeResponse {
    pub message: String,
}

/// Price summary for a valid booking request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub studio_id: StudioId,
    pub nights: u32,
    pub price_per_night: f64,
    pub total_price: f64,
}
