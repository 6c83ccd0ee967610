use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use doctor_cell::models::DoctorSnapshot;
use profile_cell::models::UserProfile;

/// Appointment document. The embedded snapshots are captured at booking
/// and never rewritten; only `cancelled` and `payment` change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub doctor_id: Uuid,
    pub user_data: UserProfile,
    pub doctor_data: DoctorSnapshot,
    pub amount: i64,
    pub slot_date: String,
    pub slot_time: String,
    pub booked_at: DateTime<Utc>,
    pub cancelled: bool,
    pub payment: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookAppointmentRequest {
    pub doctor_id: Uuid,
    pub slot_date: String,
    pub slot_time: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CancelAppointmentRequest {
    pub appointment_id: Uuid,
}

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Missing required appointment details")]
    MissingDetails,

    #[error("Doctor not found")]
    DoctorNotFound,

    #[error("Doctor not available")]
    DoctorNotAvailable,

    #[error("Slot not available")]
    SlotTaken,

    #[error("User not found")]
    UserNotFound,

    #[error("Appointment not found")]
    NotFound,

    #[error("Unauthorized action")]
    Unauthorized,

    #[error("Database error: {0}")]
    Database(String),
}
