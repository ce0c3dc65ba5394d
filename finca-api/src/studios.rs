use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use finca_booking::BookingError;
use finca_domain::StudioUnit;
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/studios", get(list_studios))
        .route("/api/studios/{id}", get(get_studio))
}

/// GET /api/studios
async fn list_studios(State(state): State<AppState>) -> Result<Json<Vec<StudioUnit>>, AppError> {
    Ok(Json(state.bookings.list_studios().await?))
}

/// GET /api/studios/{id}
async fn get_studio(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StudioUnit>, AppError> {
    // Non-numeric ids can never match a studio.
    let id = id.parse().map_err(|_| AppError::from(BookingError::StudioNotFound))?;
    Ok(Json(state.bookings.get_studio(id).await?))
}
