use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::common::Address;

/// User document minus the credential hash. Doubles as the immutable
/// user snapshot embedded into appointments at booking time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub dob: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub phone: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub address: Option<Address>,
    /// Base64 image payload; when present the avatar is replaced.
    pub image: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("User not found")]
    NotFound,

    #[error("Name is required")]
    NameRequired,

    #[error("Image upload failed: {0}")]
    Upload(String),

    #[error("Database error: {0}")]
    Database(String),
}
