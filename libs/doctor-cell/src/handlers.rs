use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::DoctorError;
use crate::services::directory::DoctorDirectoryService;

/// Public doctor directory for the booking frontend. No auth required;
/// never exposes credentials or the slot ledger.
#[axum::debug_handler]
pub async fn list_doctors(State(state): State<Arc<AppConfig>>) -> Result<Json<Value>, AppError> {
    let directory = DoctorDirectoryService::new(&state);

    let doctors = directory.list().await.map_err(|e| match e {
        DoctorError::Database(msg) => AppError::Database(msg),
        other => AppError::Internal(other.to_string()),
    })?;

    Ok(Json(json!({
        "success": true,
        "doctors": doctors
    })))
}
