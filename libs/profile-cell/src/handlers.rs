use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    Json,
};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::auth::AuthUser;
use shared_models::error::AppError;

use crate::models::{ProfileError, UpdateProfileRequest};
use crate::services::profile::ProfileService;

fn map_profile_error(e: ProfileError) -> AppError {
    match e {
        ProfileError::NotFound => AppError::NotFound("User not found".to_string()),
        ProfileError::NameRequired => AppError::Validation("Name is required".to_string()),
        ProfileError::Upload(msg) => AppError::Upload(msg),
        ProfileError::Database(msg) => AppError::Database(msg),
    }
}

#[axum::debug_handler]
pub async fn get_profile(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>, AppError> {
    let profiles = ProfileService::new(&state);
    let profile = profiles
        .get_profile(&user.id)
        .await
        .map_err(map_profile_error)?;

    Ok(Json(json!({
        "success": true,
        "user_data": profile
    })))
}

#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<Value>, AppError> {
    let profiles = ProfileService::new(&state);
    let profile = profiles
        .update_profile(&user.id, request)
        .await
        .map_err(map_profile_error)?;

    Ok(Json(json!({
        "success": true,
        "message": "Profile updated",
        "user_data": profile
    })))
}
