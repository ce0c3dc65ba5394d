use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use finca_domain::{BookingRequest, Quote};
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/quotes", post(create_quote))
}

/// POST /api/quotes
/// Runs the booking form checks and prices the stay without storing anything
async fn create_quote(
    State(state): State<AppState>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<Json<Quote>, AppError> {
    let Json(request) = payload?;
    Ok(Json(state.bookings.quote(&request).await?))
}
