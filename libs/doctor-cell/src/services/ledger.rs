use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use shared_database::store::StoreClient;

use crate::models::LedgerError;

#[derive(Debug, Deserialize)]
struct AvailabilityRow {
    available: bool,
}

/// Reserve/release primitives over a doctor's slot ledger.
///
/// Both operations delegate to store-side functions so that the
/// check-and-append happens atomically inside the store. The service never
/// reads the ledger and writes it back, so two concurrent reservations for
/// the same (doctor, date, time) cannot both succeed.
pub struct SlotLedgerService {
    store: Arc<StoreClient>,
}

impl SlotLedgerService {
    pub fn new(store: Arc<StoreClient>) -> Self {
        Self { store }
    }

    /// Appends `time` under `date` for the doctor iff it is not already
    /// present. Fails when the doctor is unknown or marked unavailable.
    pub async fn reserve(
        &self,
        doctor_id: Uuid,
        date: &str,
        time: &str,
    ) -> Result<(), LedgerError> {
        let row: Option<AvailabilityRow> = self
            .store
            .select_one(&format!("doctors?id=eq.{}&select=available", doctor_id))
            .await
            .map_err(|e| LedgerError::Database(e.to_string()))?;

        match row {
            None => return Err(LedgerError::DoctorNotFound),
            Some(row) if !row.available => return Err(LedgerError::DoctorUnavailable),
            Some(_) => {}
        }

        // Store-side conditional append: true iff the slot was free.
        let reserved: bool = self
            .store
            .rpc(
                "reserve_slot",
                json!({
                    "p_doctor_id": doctor_id,
                    "p_slot_date": date,
                    "p_slot_time": time
                }),
            )
            .await
            .map_err(|e| LedgerError::Database(e.to_string()))?;

        if !reserved {
            debug!("Slot {} {} already booked for doctor {}", date, time, doctor_id);
            return Err(LedgerError::SlotTaken);
        }

        info!("Reserved slot {} {} for doctor {}", date, time, doctor_id);
        Ok(())
    }

    /// Removes `time` under `date` for the doctor. Releasing an absent
    /// slot is a no-op.
    pub async fn release(
        &self,
        doctor_id: Uuid,
        date: &str,
        time: &str,
    ) -> Result<(), LedgerError> {
        // Returns whether a slot was actually removed; a false result is
        // still success since release is idempotent.
        let _removed: bool = self
            .store
            .rpc(
                "release_slot",
                json!({
                    "p_doctor_id": doctor_id,
                    "p_slot_date": date,
                    "p_slot_time": time
                }),
            )
            .await
            .map_err(|e| LedgerError::Database(e.to_string()))?;

        info!("Released slot {} {} for doctor {}", date, time, doctor_id);
        Ok(())
    }
}
