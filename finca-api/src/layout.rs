use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use finca_catalog::{layout_amphitheater, AmphitheaterConfig, SeatPosition, SeatRing, TieredSeatPosition};
use crate::error::AppError;
use crate::state::AppState;

/// Viewport width assumed when the caller does not send one.
const DEFAULT_VIEWPORT_WIDTH: f64 = 800.0;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeatRingQuery {
    arena_radius: Option<f64>,
    seat_radius: Option<f64>,
    gap: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ViewportQuery {
    width: Option<f64>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/layout/seats", get(seat_layout))
        .route("/api/layout/amphitheater", get(amphitheater_layout))
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// GET /api/layout/seats?arenaRadius=&seatRadius=&gap=
async fn seat_layout(
    State(state): State<AppState>,
    Query(query): Query<SeatRingQuery>,
) -> Result<Json<Vec<SeatPosition>>, AppError> {
    let ring = SeatRing {
        arena_radius: query.arena_radius.unwrap_or(state.layout.arena_radius),
        seat_radius: query.seat_radius.unwrap_or(state.layout.seat_radius),
        gap: query.gap.unwrap_or(state.layout.gap),
    };

    if ![ring.arena_radius, ring.seat_radius, ring.gap].into_iter().all(non_negative) {
        return Err(AppError::ValidationError(
            "Layout dimensions must be non-negative numbers".to_string(),
        ));
    }

    let studios = state.bookings.list_studios().await?;
    Ok(Json(ring.layout(&studios)))
}

/// GET /api/layout/amphitheater?width=
async fn amphitheater_layout(
    State(state): State<AppState>,
    Query(query): Query<ViewportQuery>,
) -> Result<Json<Vec<TieredSeatPosition>>, AppError> {
    let width = query.width.unwrap_or(DEFAULT_VIEWPORT_WIDTH);
    if !(width.is_finite() && width > 0.0) {
        return Err(AppError::ValidationError("Viewport width must be positive".to_string()));
    }

    let studios = state.bookings.list_studios().await?;
    Ok(Json(layout_amphitheater(&studios, &AmphitheaterConfig::for_viewport(width))))
}
