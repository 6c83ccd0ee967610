use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, info, warn};
use uuid::Uuid;

use doctor_cell::models::{Doctor, LedgerError};
use doctor_cell::services::ledger::SlotLedgerService;
use profile_cell::models::UserProfile;
use shared_config::AppConfig;
use shared_database::store::StoreClient;

use crate::models::{Appointment, BookAppointmentRequest, BookingError};

const USER_SNAPSHOT_COLUMNS: &str = "id,name,email,image,phone,address,gender,dob";

/// Appointment workflow: create, list, and cancel appointment documents,
/// coordinating the doctor's slot ledger as a side effect.
pub struct BookingService {
    store: Arc<StoreClient>,
    ledger: SlotLedgerService,
}

impl BookingService {
    pub fn new(config: &AppConfig) -> Self {
        let store = Arc::new(StoreClient::new(config));
        let ledger = SlotLedgerService::new(Arc::clone(&store));
        Self { store, ledger }
    }

    pub async fn book(
        &self,
        user_id: Uuid,
        request: BookAppointmentRequest,
    ) -> Result<Appointment, BookingError> {
        if request.slot_date.trim().is_empty() || request.slot_time.trim().is_empty() {
            return Err(BookingError::MissingDetails);
        }

        let doctor: Option<Doctor> = self
            .store
            .select_one(&format!("doctors?id=eq.{}", request.doctor_id))
            .await
            .map_err(|e| BookingError::Database(e.to_string()))?;
        let doctor = doctor.ok_or(BookingError::DoctorNotFound)?;

        if !doctor.available {
            return Err(BookingError::DoctorNotAvailable);
        }

        let user: Option<UserProfile> = self
            .store
            .select_one(&format!(
                "users?id=eq.{}&select={}",
                user_id, USER_SNAPSHOT_COLUMNS
            ))
            .await
            .map_err(|e| BookingError::Database(e.to_string()))?;
        let user = user.ok_or(BookingError::UserNotFound)?;

        self.ledger
            .reserve(doctor.id, &request.slot_date, &request.slot_time)
            .await
            .map_err(map_ledger_error)?;

        // From here the slot is held; a failed appointment write must give
        // it back or the ledger shows a booking no appointment backs.
        match self.create_appointment(user_id, &doctor, user, &request).await {
            Ok(appointment) => {
                info!(
                    "Appointment {} booked for user {} with doctor {}",
                    appointment.id, user_id, doctor.id
                );
                Ok(appointment)
            }
            Err(e) => {
                warn!("Appointment write failed after reserve, releasing slot: {}", e);
                if let Err(release_err) = self
                    .ledger
                    .release(doctor.id, &request.slot_date, &request.slot_time)
                    .await
                {
                    warn!("Compensating release failed: {}", release_err);
                }
                Err(e)
            }
        }
    }

    async fn create_appointment(
        &self,
        user_id: Uuid,
        doctor: &Doctor,
        user: UserProfile,
        request: &BookAppointmentRequest,
    ) -> Result<Appointment, BookingError> {
        self.store
            .insert(
                "appointments",
                json!({
                    "id": Uuid::new_v4(),
                    "user_id": user_id,
                    "doctor_id": doctor.id,
                    "user_data": user,
                    "doctor_data": doctor.snapshot(),
                    "amount": doctor.fees,
                    "slot_date": request.slot_date,
                    "slot_time": request.slot_time,
                    "booked_at": Utc::now(),
                    "cancelled": false,
                    "payment": false
                }),
            )
            .await
            .map_err(|e| BookingError::Database(e.to_string()))
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<Appointment>, BookingError> {
        debug!("Listing appointments for user {}", user_id);
        self.store
            .select(&format!("appointments?user_id=eq.{}", user_id))
            .await
            .map_err(|e| BookingError::Database(e.to_string()))
    }

    /// Every appointment in the system, oldest first.
    pub async fn list_all(&self) -> Result<Vec<Appointment>, BookingError> {
        self.store
            .select("appointments?order=booked_at.asc")
            .await
            .map_err(|e| BookingError::Database(e.to_string()))
    }

    /// User-initiated cancellation; enforces ownership.
    pub async fn cancel(&self, user_id: Uuid, appointment_id: Uuid) -> Result<(), BookingError> {
        self.cancel_inner(Some(user_id), appointment_id).await
    }

    /// Privileged cancellation path: same mechanics, no ownership check.
    pub async fn admin_cancel(&self, appointment_id: Uuid) -> Result<(), BookingError> {
        self.cancel_inner(None, appointment_id).await
    }

    async fn cancel_inner(
        &self,
        owner: Option<Uuid>,
        appointment_id: Uuid,
    ) -> Result<(), BookingError> {
        let appointment: Option<Appointment> = self
            .store
            .select_one(&format!("appointments?id=eq.{}", appointment_id))
            .await
            .map_err(|e| BookingError::Database(e.to_string()))?;
        let appointment = appointment.ok_or(BookingError::NotFound)?;

        // Ownership check happens before any write so an unauthorized
        // caller leaves both the appointment and the ledger untouched.
        if let Some(user_id) = owner {
            if appointment.user_id != user_id {
                return Err(BookingError::Unauthorized);
            }
        }

        self.store
            .update(
                &format!("appointments?id=eq.{}", appointment_id),
                json!({ "cancelled": true }),
            )
            .await
            .map_err(|e| BookingError::Database(e.to_string()))?;

        self.ledger
            .release(
                appointment.doctor_id,
                &appointment.slot_date,
                &appointment.slot_time,
            )
            .await
            .map_err(map_ledger_error)?;

        info!("Appointment {} cancelled", appointment_id);
        Ok(())
    }
}

fn map_ledger_error(e: LedgerError) -> BookingError {
    match e {
        LedgerError::DoctorNotFound => BookingError::DoctorNotFound,
        LedgerError::DoctorUnavailable => BookingError::DoctorNotAvailable,
        LedgerError::SlotTaken => BookingError::SlotTaken,
        LedgerError::Database(msg) => BookingError::Database(msg),
    }
}
