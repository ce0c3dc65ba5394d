use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use finca_booking::BookingError;
use finca_domain::ErrorBody;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    NotFoundError(String),
    ConflictError(String),
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            },
        };

        (status, Json(ErrorBody { error: error_message })).into_response()
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        let msg = err.to_string();
        match err {
            BookingError::MissingFields
            | BookingError::CapacityExceeded { .. }
            | BookingError::InvalidDateRange
            | BookingError::Validation(_) => AppError::ValidationError(msg),
            BookingError::StudioNotFound | BookingError::BookingNotFound(_) => AppError::NotFoundError(msg),
            BookingError::InvalidTransition { .. } => AppError::ConflictError(msg),
            BookingError::Repository(_) => AppError::InternalServerError(msg),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}
