use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, error};
use uuid::Uuid;

use shared_config::AppConfig;

const BUCKET: &str = "images";

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("invalid image payload: {0}")]
    InvalidPayload(String),

    #[error("asset upload failed ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("asset upload request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Client for the external asset host. Accepts a base64 (optionally
/// data-URL prefixed) image and returns a durable public URL.
pub struct AssetClient {
    client: Client,
    base_url: String,
    service_key: String,
}

impl AssetClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.store_url.clone(),
            service_key: config.store_service_key.clone(),
        }
    }

    pub async fn upload_image(&self, folder: &str, base64_image: &str) -> Result<String, AssetError> {
        // Accept both raw base64 and "data:image/jpeg;base64,..." payloads.
        let parts: Vec<&str> = base64_image.split(',').collect();
        let base64_data = if parts.len() > 1 { parts[1] } else { base64_image };

        let image_data = BASE64
            .decode(base64_data.trim())
            .map_err(|e| AssetError::InvalidPayload(e.to_string()))?;

        let file_ext = if base64_image.contains("image/png") {
            "png"
        } else if base64_image.contains("image/jpeg") || base64_image.contains("image/jpg") {
            "jpg"
        } else {
            "png"
        };

        let object_path = format!("{}/{}.{}", folder, Uuid::new_v4(), file_ext);
        let url = format!("{}/storage/v1/object/{}/{}", self.base_url, BUCKET, object_path);
        debug!("Uploading image to {}", url);

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
            .header("Content-Type", format!("image/{}", file_ext))
            .body(image_data)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!("Asset upload failed ({}): {}", status, message);
            return Err(AssetError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, BUCKET, object_path
        ))
    }
}
