use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};

use appointment_cell::handlers::map_booking_error;
use appointment_cell::models::CancelAppointmentRequest;
use appointment_cell::services::booking::BookingService;
use doctor_cell::models::{AddDoctorRequest, DoctorError};
use doctor_cell::services::directory::DoctorDirectoryService;
use doctor_cell::services::onboarding::DoctorOnboardingService;
use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::AdminError;
use crate::services::dashboard::DashboardService;

fn map_doctor_error(e: DoctorError) -> AppError {
    match e {
        DoctorError::MissingDetails => AppError::Validation("Missing details".to_string()),
        DoctorError::ImageRequired => AppError::Validation("Image file is required".to_string()),
        DoctorError::InvalidEmail => AppError::Validation("Enter a valid email".to_string()),
        DoctorError::WeakPassword => AppError::Validation("Enter a strong password".to_string()),
        DoctorError::EmailTaken => AppError::Conflict("Doctor already registered".to_string()),
        DoctorError::Upload(msg) => AppError::Upload(msg),
        DoctorError::Hash(msg) => AppError::Internal(msg),
        DoctorError::Database(msg) => AppError::Database(msg),
    }
}

fn map_admin_error(e: AdminError) -> AppError {
    match e {
        AdminError::Database(msg) => AppError::Database(msg),
    }
}

#[axum::debug_handler]
pub async fn add_doctor(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<AddDoctorRequest>,
) -> Result<Json<Value>, AppError> {
    let onboarding = DoctorOnboardingService::new(&state);

    let doctor = onboarding
        .add_doctor(request)
        .await
        .map_err(map_doctor_error)?;

    Ok(Json(json!({
        "success": true,
        "message": "Doctor added",
        "doctor": doctor
    })))
}

#[axum::debug_handler]
pub async fn all_doctors(State(state): State<Arc<AppConfig>>) -> Result<Json<Value>, AppError> {
    let directory = DoctorDirectoryService::new(&state);

    let doctors = directory.list().await.map_err(map_doctor_error)?;

    Ok(Json(json!({
        "success": true,
        "doctors": doctors
    })))
}

#[axum::debug_handler]
pub async fn all_appointments(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let bookings = BookingService::new(&state);

    let appointments = bookings.list_all().await.map_err(map_booking_error)?;

    Ok(Json(json!({
        "success": true,
        "appointments": appointments
    })))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<CancelAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let bookings = BookingService::new(&state);

    bookings
        .admin_cancel(request.appointment_id)
        .await
        .map_err(map_booking_error)?;

    Ok(Json(json!({
        "success": true,
        "message": "Appointment cancelled successfully"
    })))
}

#[axum::debug_handler]
pub async fn dashboard(State(state): State<Arc<AppConfig>>) -> Result<Json<Value>, AppError> {
    let dashboards = DashboardService::new(&state);

    let dash_data = dashboards.dashboard().await.map_err(map_admin_error)?;

    Ok(Json(json!({
        "success": true,
        "dash_data": dash_data
    })))
}
