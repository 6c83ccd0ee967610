use std::sync::Arc;

use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::AuthUser;

use crate::jwt::issue_token;

pub struct TestConfig {
    pub store_url: String,
    pub jwt_secret: String,
    pub admin_email: String,
    pub admin_password: String,
    pub gateway_base_url: String,
    pub currency: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            store_url: "http://localhost:54321".to_string(),
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            admin_email: "admin@clinic.test".to_string(),
            admin_password: "correct-horse-battery".to_string(),
            gateway_base_url: "http://localhost:54322/v1".to_string(),
            currency: "USD".to_string(),
        }
    }
}

impl TestConfig {
    pub fn with_store_url(store_url: &str) -> Self {
        Self {
            store_url: store_url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            store_url: self.store_url.clone(),
            store_service_key: "test-service-key".to_string(),
            jwt_secret: self.jwt_secret.clone(),
            admin_email: self.admin_email.clone(),
            admin_password: self.admin_password.clone(),
            gateway_base_url: self.gateway_base_url.clone(),
            gateway_key_id: "test-key-id".to_string(),
            gateway_key_secret: "test-key-secret".to_string(),
            currency: self.currency.clone(),
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestUser {
    pub id: String,
    pub email: String,
    pub role: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: "test@example.com".to_string(),
            role: "user".to_string(),
        }
    }
}

impl TestUser {
    pub fn new(email: &str, role: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            role: role.to_string(),
        }
    }

    pub fn user(email: &str) -> Self {
        Self::new(email, "user")
    }

    pub fn admin(email: &str) -> Self {
        Self::new(email, "admin")
    }

    pub fn token(&self, secret: &str) -> String {
        issue_token(&self.id, &self.role, Some(&self.email), secret)
            .expect("test token issuance")
    }

    pub fn to_auth_user(&self) -> AuthUser {
        AuthUser {
            id: self.id.clone(),
            role: self.role.clone(),
            email: Some(self.email.clone()),
        }
    }
}

/// Canned document-store rows matching the collection schemas.
pub struct MockStoreRows;

impl MockStoreRows {
    pub fn user_row(id: &str, name: &str, email: &str, password_hash: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "email": email,
            "password_hash": password_hash,
            "image": "",
            "phone": "",
            "address": { "line1": "", "line2": "" },
            "gender": "",
            "dob": "",
            "created_at": "2024-01-01T00:00:00Z"
        })
    }

    pub fn doctor_row(id: &str, name: &str, fees: i64, available: bool, slots_booked: Value) -> Value {
        json!({
            "id": id,
            "name": name,
            "email": "doctor@example.com",
            "password_hash": "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2g",
            "image": "https://assets.example.com/doctors/default.png",
            "speciality": "General physician",
            "degree": "MBBS",
            "experience": "4 Years",
            "about": "Experienced general physician",
            "fees": fees,
            "address": { "line1": "17th Cross, Richmond", "line2": "Circle, Ring Road" },
            "available": available,
            "slots_booked": slots_booked,
            "created_at": "2024-01-01T00:00:00Z"
        })
    }

    pub fn appointment_row(
        id: &str,
        user_id: &str,
        doctor_id: &str,
        slot_date: &str,
        slot_time: &str,
        cancelled: bool,
        payment: bool,
    ) -> Value {
        json!({
            "id": id,
            "user_id": user_id,
            "doctor_id": doctor_id,
            "user_data": {
                "id": user_id,
                "name": "Test User",
                "email": "test@example.com",
                "image": "",
                "phone": "",
                "address": { "line1": "", "line2": "" },
                "gender": "",
                "dob": ""
            },
            "doctor_data": {
                "id": doctor_id,
                "name": "Dr. Test",
                "email": "doctor@example.com",
                "image": "https://assets.example.com/doctors/default.png",
                "speciality": "General physician",
                "degree": "MBBS",
                "experience": "4 Years",
                "about": "Experienced general physician",
                "fees": 50,
                "address": { "line1": "17th Cross, Richmond", "line2": "Circle, Ring Road" }
            },
            "amount": 50,
            "slot_date": slot_date,
            "slot_time": slot_time,
            "booked_at": "2024-01-05T10:00:00Z",
            "cancelled": cancelled,
            "payment": payment
        })
    }
}
