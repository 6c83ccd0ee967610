use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::common::Address;

// ==============================================================================
// SLOT LEDGER
// ==============================================================================

/// Per-doctor mapping from date key to the time keys already reserved on
/// that date. Within one doctor a (date, time) pair appears at most once.
///
/// This in-memory form mirrors the semantics of the store-side conditional
/// RPCs; the service layer never writes it back wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotLedger(pub HashMap<String, Vec<String>>);

impl SlotLedger {
    pub fn is_booked(&self, date: &str, time: &str) -> bool {
        self.0
            .get(date)
            .map(|times| times.iter().any(|t| t == time))
            .unwrap_or(false)
    }

    /// Appends the time under the date key. Returns false (and leaves the
    /// ledger untouched) when the slot is already reserved.
    pub fn reserve(&mut self, date: &str, time: &str) -> bool {
        if self.is_booked(date, time) {
            return false;
        }
        self.0.entry(date.to_string()).or_default().push(time.to_string());
        true
    }

    /// Removes the time under the date key. Releasing an absent slot is a
    /// no-op, not an error.
    pub fn release(&mut self, date: &str, time: &str) {
        if let Some(times) = self.0.get_mut(date) {
            times.retain(|t| t != time);
            if times.is_empty() {
                self.0.remove(date);
            }
        }
    }
}

// ==============================================================================
// DOCTOR DOCUMENTS
// ==============================================================================

/// Full doctor document as stored. Never serialized to clients; responses
/// use `DoctorSnapshot` or `DoctorListing`, which carry no credentials and
/// no live ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub image: String,
    pub speciality: String,
    pub degree: String,
    pub experience: String,
    pub about: String,
    pub fees: i64,
    pub address: Address,
    pub available: bool,
    #[serde(default)]
    pub slots_booked: SlotLedger,
    pub created_at: DateTime<Utc>,
}

impl Doctor {
    /// Point-in-time copy embedded into appointments at booking.
    pub fn snapshot(&self) -> DoctorSnapshot {
        DoctorSnapshot {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            image: self.image.clone(),
            speciality: self.speciality.clone(),
            degree: self.degree.clone(),
            experience: self.experience.clone(),
            about: self.about.clone(),
            fees: self.fees,
            address: self.address.clone(),
        }
    }
}

/// Doctor data minus credentials and the live slot ledger. Immutable once
/// embedded in an appointment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorSnapshot {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image: String,
    pub speciality: String,
    pub degree: String,
    pub experience: String,
    pub about: String,
    pub fees: i64,
    pub address: Address,
}

/// Directory row for listings: snapshot fields plus the availability flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorListing {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image: String,
    pub speciality: String,
    pub degree: String,
    pub experience: String,
    pub about: String,
    pub fees: i64,
    pub address: Address,
    pub available: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddDoctorRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub speciality: String,
    pub degree: String,
    pub experience: String,
    pub about: String,
    pub fees: i64,
    pub address: Address,
    /// Base64 image payload, optionally data-URL prefixed.
    pub image: String,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum DoctorError {
    #[error("Missing details")]
    MissingDetails,

    #[error("Image file is required")]
    ImageRequired,

    #[error("Enter a valid email")]
    InvalidEmail,

    #[error("Enter a strong password")]
    WeakPassword,

    #[error("Doctor already registered")]
    EmailTaken,

    #[error("Image upload failed: {0}")]
    Upload(String),

    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Database error: {0}")]
    Database(String),
}

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Doctor not found")]
    DoctorNotFound,

    #[error("Doctor not available")]
    DoctorUnavailable,

    #[error("Slot not available")]
    SlotTaken,

    #[error("Database error: {0}")]
    Database(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserve_rejects_duplicate_until_released() {
        let mut ledger = SlotLedger::default();
        assert!(ledger.reserve("2024-01-10", "10:00"));
        assert!(!ledger.reserve("2024-01-10", "10:00"));

        ledger.release("2024-01-10", "10:00");
        assert!(ledger.reserve("2024-01-10", "10:00"));
    }

    #[test]
    fn reserve_appends_distinct_times_in_order() {
        let mut ledger = SlotLedger::default();
        ledger.reserve("2024-01-10", "10:00");
        assert!(ledger.reserve("2024-01-10", "11:00"));

        assert_eq!(
            ledger.0.get("2024-01-10").unwrap(),
            &vec!["10:00".to_string(), "11:00".to_string()]
        );
    }

    #[test]
    fn release_is_idempotent() {
        let mut ledger = SlotLedger::default();
        ledger.reserve("2024-01-10", "10:00");

        ledger.release("2024-01-10", "10:00");
        let after_first = ledger.clone();
        ledger.release("2024-01-10", "10:00");

        assert_eq!(ledger, after_first);
        assert!(!ledger.is_booked("2024-01-10", "10:00"));
    }

    #[test]
    fn release_on_unknown_date_is_a_noop() {
        let mut ledger = SlotLedger::default();
        ledger.release("2024-02-01", "09:00");
        assert_eq!(ledger, SlotLedger::default());
    }
}
