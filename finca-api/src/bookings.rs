use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use finca_domain::{CancellationResponse, ConfirmedBooking, NewBooking};
use tracing::warn;
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/bookings", get(list_bookings).post(create_booking))
        .route("/api/bookings/{id}", get(get_booking).delete(cancel_booking))
        .route("/api/bookings/{id}/confirm", post(confirm_booking))
}

/// GET /api/bookings
async fn list_bookings(State(state): State<AppState>) -> Result<Json<Vec<ConfirmedBooking>>, AppError> {
    Ok(Json(state.bookings.list_bookings().await?))
}

/// GET /api/bookings/{id}
async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ConfirmedBooking>, AppError> {
    Ok(Json(state.bookings.get_booking(&id).await?))
}

/// POST /api/bookings
async fn create_booking(
    State(state): State<AppState>,
    payload: Result<Json<NewBooking>, JsonRejection>,
) -> Result<(StatusCode, Json<ConfirmedBooking>), AppError> {
    let Json(body) = payload.map_err(|rejection| {
        warn!("Rejected booking payload: {}", rejection.body_text());
        AppError::from(rejection)
    })?;

    let booking = state.bookings.create_booking(body).await.map_err(|e| {
        warn!("Booking rejected: {}", e);
        AppError::from(e)
    })?;

    Ok((StatusCode::CREATED, Json(booking)))
}

/// POST /api/bookings/{id}/confirm
/// Accept a booking left pending when auto-confirmation is off
async fn confirm_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ConfirmedBooking>, AppError> {
    Ok(Json(state.bookings.confirm_booking(&id).await?))
}

/// DELETE /api/bookings/{id}
async fn cancel_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CancellationResponse>, AppError> {
    let booking = state.bookings.cancel_booking(&id).await?;
    Ok(Json(CancellationResponse {
        message: "Booking cancelled".to_string(),
        booking,
    }))
}
