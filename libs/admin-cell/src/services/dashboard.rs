use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use appointment_cell::models::Appointment;
use shared_config::AppConfig;
use shared_database::store::StoreClient;

use crate::models::{AdminError, DashboardData};

const LATEST_LIMIT: usize = 5;

#[derive(Deserialize)]
struct IdRow {
    #[allow(dead_code)]
    id: Uuid,
}

/// Aggregates collection counts and recent activity for the dashboard.
pub struct DashboardService {
    store: Arc<StoreClient>,
}

impl DashboardService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: Arc::new(StoreClient::new(config)),
        }
    }

    pub async fn dashboard(&self) -> Result<DashboardData, AdminError> {
        let doctors: Vec<IdRow> = self
            .store
            .select("doctors?select=id")
            .await
            .map_err(|e| AdminError::Database(e.to_string()))?;

        let patients: Vec<IdRow> = self
            .store
            .select("users?select=id")
            .await
            .map_err(|e| AdminError::Database(e.to_string()))?;

        let appointments: Vec<Appointment> = self
            .store
            .select("appointments?order=booked_at.asc")
            .await
            .map_err(|e| AdminError::Database(e.to_string()))?;

        debug!(
            "Dashboard: {} doctors, {} patients, {} appointments",
            doctors.len(),
            patients.len(),
            appointments.len()
        );

        let total = appointments.len();
        let latest_appointments: Vec<Appointment> = appointments
            .into_iter()
            .rev()
            .take(LATEST_LIMIT)
            .collect();

        Ok(DashboardData {
            doctors: doctors.len(),
            appointments: total,
            patients: patients.len(),
            latest_appointments,
        })
    }
}
