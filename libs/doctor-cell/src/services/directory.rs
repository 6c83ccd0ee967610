use std::sync::Arc;

use tracing::debug;

use shared_config::AppConfig;
use shared_database::store::StoreClient;

use crate::models::{DoctorError, DoctorListing};

/// Columns safe to expose: everything except the credential hash and the
/// live slot ledger.
const LISTING_COLUMNS: &str =
    "id,name,email,image,speciality,degree,experience,about,fees,address,available";

pub struct DoctorDirectoryService {
    store: Arc<StoreClient>,
}

impl DoctorDirectoryService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: Arc::new(StoreClient::new(config)),
        }
    }

    pub async fn list(&self) -> Result<Vec<DoctorListing>, DoctorError> {
        debug!("Listing doctor directory");
        self.store
            .select(&format!("doctors?select={}", LISTING_COLUMNS))
            .await
            .map_err(|e| DoctorError::Database(e.to_string()))
    }
}
