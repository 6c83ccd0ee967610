use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use auth_cell::services::password::PasswordService;
use shared_config::AppConfig;
use shared_database::storage::AssetClient;
use shared_database::store::{StoreClient, StoreError};
use shared_utils::validation::is_valid_email;

use crate::models::{AddDoctorRequest, Doctor, DoctorError, DoctorSnapshot};

const MIN_PASSWORD_LEN: usize = 8;

pub struct DoctorOnboardingService {
    store: Arc<StoreClient>,
    assets: AssetClient,
}

impl DoctorOnboardingService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: Arc::new(StoreClient::new(config)),
            assets: AssetClient::new(config),
        }
    }

    pub async fn add_doctor(&self, request: AddDoctorRequest) -> Result<DoctorSnapshot, DoctorError> {
        let required = [
            &request.name,
            &request.email,
            &request.password,
            &request.speciality,
            &request.degree,
            &request.experience,
            &request.about,
        ];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(DoctorError::MissingDetails);
        }
        if request.image.trim().is_empty() {
            return Err(DoctorError::ImageRequired);
        }
        if !is_valid_email(&request.email) {
            return Err(DoctorError::InvalidEmail);
        }
        if request.password.len() < MIN_PASSWORD_LEN {
            return Err(DoctorError::WeakPassword);
        }

        let image_url = self
            .assets
            .upload_image("doctors", &request.image)
            .await
            .map_err(|e| DoctorError::Upload(e.to_string()))?;

        let password_hash = PasswordService::hash_password(&request.password)
            .map_err(|e| DoctorError::Hash(e.to_string()))?;

        let doctor: Doctor = self
            .store
            .insert(
                "doctors",
                json!({
                    "id": Uuid::new_v4(),
                    "name": request.name,
                    "email": request.email,
                    "password_hash": password_hash,
                    "image": image_url,
                    "speciality": request.speciality,
                    "degree": request.degree,
                    "experience": request.experience,
                    "about": request.about,
                    "fees": request.fees,
                    "address": request.address,
                    "available": true,
                    "slots_booked": {},
                    "created_at": Utc::now()
                }),
            )
            .await
            .map_err(|e| match e {
                StoreError::Conflict(_) => DoctorError::EmailTaken,
                other => DoctorError::Database(other.to_string()),
            })?;

        info!("Doctor {} onboarded with empty slot ledger", doctor.id);
        Ok(doctor.snapshot())
    }
}
