use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::AuthUser;
use shared_models::error::AppError;

use crate::models::{BookAppointmentRequest, BookingError, CancelAppointmentRequest};
use crate::services::booking::BookingService;

pub fn map_booking_error(e: BookingError) -> AppError {
    match e {
        BookingError::MissingDetails => {
            AppError::Validation("Missing required appointment details".to_string())
        }
        BookingError::DoctorNotFound => AppError::NotFound("Doctor not found".to_string()),
        BookingError::DoctorNotAvailable => {
            AppError::Unavailable("Doctor not available".to_string())
        }
        BookingError::SlotTaken => AppError::Unavailable("Slot not available".to_string()),
        BookingError::UserNotFound => AppError::NotFound("User not found".to_string()),
        BookingError::NotFound => AppError::NotFound("Appointment not found".to_string()),
        BookingError::Unauthorized => AppError::Auth("Unauthorized action".to_string()),
        BookingError::Database(msg) => AppError::Database(msg),
    }
}

fn caller_id(user: &AuthUser) -> Result<Uuid, AppError> {
    Uuid::parse_str(&user.id).map_err(|_| AppError::Auth("User not authenticated".to_string()))
}

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let user_id = caller_id(&user)?;
    let bookings = BookingService::new(&state);

    let appointment = bookings
        .book(user_id, request)
        .await
        .map_err(map_booking_error)?;

    Ok(Json(json!({
        "success": true,
        "message": "Appointment booked successfully",
        "appointment": appointment
    })))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>, AppError> {
    let user_id = caller_id(&user)?;
    let bookings = BookingService::new(&state);

    let appointments = bookings.list(user_id).await.map_err(map_booking_error)?;

    Ok(Json(json!({
        "success": true,
        "appointments": appointments
    })))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<CancelAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let user_id = caller_id(&user)?;
    let bookings = BookingService::new(&state);

    bookings
        .cancel(user_id, request.appointment_id)
        .await
        .map_err(map_booking_error)?;

    Ok(Json(json!({
        "success": true,
        "message": "Appointment cancelled successfully"
    })))
}
