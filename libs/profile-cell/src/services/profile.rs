use std::sync::Arc;

use serde_json::{json, Map, Value};
use tracing::{debug, info};

use shared_config::AppConfig;
use shared_database::storage::AssetClient;
use shared_database::store::StoreClient;

use crate::models::{ProfileError, UpdateProfileRequest, UserProfile};

/// Everything except the credential hash.
const PROFILE_COLUMNS: &str = "id,name,email,image,phone,address,gender,dob";

pub struct ProfileService {
    store: Arc<StoreClient>,
    assets: AssetClient,
}

impl ProfileService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: Arc::new(StoreClient::new(config)),
            assets: AssetClient::new(config),
        }
    }

    pub async fn get_profile(&self, user_id: &str) -> Result<UserProfile, ProfileError> {
        debug!("Fetching profile for user {}", user_id);

        let profile: Option<UserProfile> = self
            .store
            .select_one(&format!("users?id=eq.{}&select={}", user_id, PROFILE_COLUMNS))
            .await
            .map_err(|e| ProfileError::Database(e.to_string()))?;

        profile.ok_or(ProfileError::NotFound)
    }

    /// Single-write update: when an avatar is supplied it is uploaded
    /// first and its URL folded into the same patch as the profile
    /// fields, so a failed upload leaves the document untouched.
    pub async fn update_profile(
        &self,
        user_id: &str,
        request: UpdateProfileRequest,
    ) -> Result<UserProfile, ProfileError> {
        if request.name.trim().is_empty() {
            return Err(ProfileError::NameRequired);
        }

        let mut patch = Map::new();
        patch.insert("name".to_string(), json!(request.name));
        patch.insert("phone".to_string(), json!(request.phone.unwrap_or_default()));
        patch.insert("dob".to_string(), json!(request.dob.unwrap_or_default()));
        patch.insert("gender".to_string(), json!(request.gender.unwrap_or_default()));
        if let Some(address) = request.address {
            patch.insert("address".to_string(), json!(address));
        }

        if let Some(image) = request.image.filter(|i| !i.trim().is_empty()) {
            let image_url = self
                .assets
                .upload_image("avatars", &image)
                .await
                .map_err(|e| ProfileError::Upload(e.to_string()))?;
            patch.insert("image".to_string(), json!(image_url));
        }

        let mut updated: Vec<UserProfile> = self
            .store
            .update_returning(
                &format!("users?id=eq.{}&select={}", user_id, PROFILE_COLUMNS),
                Value::Object(patch),
            )
            .await
            .map_err(|e| ProfileError::Database(e.to_string()))?;

        if updated.is_empty() {
            return Err(ProfileError::NotFound);
        }

        info!("Updated profile for user {}", user_id);
        Ok(updated.remove(0))
    }
}
