use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{AdminLoginRequest, AuthError, LoginRequest, RegisterRequest};
use crate::services::account::AccountService;

fn map_auth_error(e: AuthError) -> AppError {
    match e {
        AuthError::MissingDetails => AppError::Validation("Missing details".to_string()),
        AuthError::InvalidEmail => AppError::Validation("Enter a valid email".to_string()),
        AuthError::WeakPassword => AppError::Validation("Enter a strong password".to_string()),
        AuthError::EmailTaken => AppError::Conflict("User already registered".to_string()),
        AuthError::UserNotFound => AppError::NotFound("User does not exist".to_string()),
        AuthError::InvalidCredentials => AppError::Auth("Invalid credentials".to_string()),
        AuthError::Database(msg) => AppError::Database(msg),
        other => AppError::Internal(other.to_string()),
    }
}

#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<Value>, AppError> {
    let accounts = AccountService::new(&state);
    let token = accounts.register(request).await.map_err(map_auth_error)?;

    Ok(Json(json!({
        "success": true,
        "token": token
    })))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    let accounts = AccountService::new(&state);
    let token = accounts.login(request).await.map_err(map_auth_error)?;

    Ok(Json(json!({
        "success": true,
        "token": token
    })))
}

#[axum::debug_handler]
pub async fn admin_login(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<AdminLoginRequest>,
) -> Result<Json<Value>, AppError> {
    let accounts = AccountService::new(&state);
    let token = accounts
        .admin_login(&request.email, &request.password)
        .map_err(map_auth_error)?;

    Ok(Json(json!({
        "success": true,
        "token": token
    })))
}
