use axum::{
    http::Method,
    routing::get,
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use finca_domain::WelcomeResponse;

pub mod state;
pub mod error;
pub mod studios;
pub mod bookings;
pub mod quotes;
pub mod layout;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // The mobile app calls from any origin
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            axum::http::header::ACCEPT,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    Router::new()
        .route("/", get(welcome))
        .merge(studios::routes())
        .merge(bookings::routes())
        .merge(quotes::routes())
        .merge(layout::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "🏛️ Finca M&M API - Amphitheatrum Edition".to_string(),
    })
}
