use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::store::{StoreClient, StoreError};
use shared_models::common::Address;
use shared_utils::jwt::issue_token;
use shared_utils::validation::is_valid_email;
use urlencoding::encode;

use crate::models::{AuthError, LoginRequest, RegisterRequest, UserAccount};
use crate::services::password::PasswordService;

const MIN_PASSWORD_LEN: usize = 8;

const ACCOUNT_COLUMNS: &str = "id,name,email,password_hash";

/// Credential service: registration, login, and the fixed admin identity.
/// Issues self-contained bearer tokens; no server-side session state.
pub struct AccountService {
    store: Arc<StoreClient>,
    config: AppConfig,
}

impl AccountService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: Arc::new(StoreClient::new(config)),
            config: config.clone(),
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<String, AuthError> {
        if request.name.trim().is_empty()
            || request.email.trim().is_empty()
            || request.password.is_empty()
        {
            return Err(AuthError::MissingDetails);
        }
        if !is_valid_email(&request.email) {
            return Err(AuthError::InvalidEmail);
        }
        if request.password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }

        let password_hash = PasswordService::hash_password(&request.password)
            .map_err(|e| AuthError::Hash(e.to_string()))?;

        // Email uniqueness is the store's guarantee; a duplicate surfaces
        // as a conflict on insert.
        let account: UserAccount = self
            .store
            .insert(
                "users",
                json!({
                    "id": Uuid::new_v4(),
                    "name": request.name,
                    "email": request.email,
                    "password_hash": password_hash,
                    "image": "",
                    "phone": "",
                    "address": Address::default(),
                    "gender": "",
                    "dob": "",
                    "created_at": Utc::now()
                }),
            )
            .await
            .map_err(|e| match e {
                StoreError::Conflict(_) => AuthError::EmailTaken,
                other => AuthError::Database(other.to_string()),
            })?;

        info!("Registered user {}", account.id);
        self.issue(&account.id.to_string(), "user", Some(&account.email))
    }

    pub async fn login(&self, request: LoginRequest) -> Result<String, AuthError> {
        let account: Option<UserAccount> = self
            .store
            .select_one(&format!(
                "users?email=eq.{}&select={}",
                encode(&request.email),
                ACCOUNT_COLUMNS
            ))
            .await
            .map_err(|e| AuthError::Database(e.to_string()))?;

        let account = account.ok_or(AuthError::UserNotFound)?;

        let verified = PasswordService::verify_password(&request.password, &account.password_hash)
            .map_err(|e| AuthError::Hash(e.to_string()))?;
        if !verified {
            debug!("Password mismatch for {}", account.id);
            return Err(AuthError::InvalidCredentials);
        }

        self.issue(&account.id.to_string(), "user", Some(&account.email))
    }

    /// Compares against the two process-configured admin credentials;
    /// succeeds only on exact match of both.
    pub fn admin_login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        if self.config.admin_email.is_empty()
            || email != self.config.admin_email
            || password != self.config.admin_password
        {
            return Err(AuthError::InvalidCredentials);
        }

        info!("Admin login succeeded");
        self.issue("admin", "admin", Some(email))
    }

    fn issue(&self, subject: &str, role: &str, email: Option<&str>) -> Result<String, AuthError> {
        issue_token(subject, role, email, &self.config.jwt_secret).map_err(AuthError::Token)
    }
}
