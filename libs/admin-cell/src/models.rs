use serde::Serialize;

use appointment_cell::models::Appointment;

/// Overview figures for the admin dashboard. Latest appointments are
/// capped at five, most recent first.
#[derive(Debug, Serialize)]
pub struct DashboardData {
    pub doctors: usize,
    pub appointments: usize,
    pub patients: usize,
    pub latest_appointments: Vec<Appointment>,
}

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("Database error: {0}")]
    Database(String),
}
