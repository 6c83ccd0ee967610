use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store_url: String,
    pub store_service_key: String,
    pub jwt_secret: String,
    pub admin_email: String,
    pub admin_password: String,
    pub gateway_base_url: String,
    pub gateway_key_id: String,
    pub gateway_key_secret: String,
    pub currency: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            store_url: env::var("STORE_URL").unwrap_or_else(|_| {
                warn!("STORE_URL not set, using empty value");
                String::new()
            }),
            store_service_key: env::var("STORE_SERVICE_KEY").unwrap_or_else(|_| {
                warn!("STORE_SERVICE_KEY not set, using empty value");
                String::new()
            }),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| {
                warn!("JWT_SECRET not set, using empty value");
                String::new()
            }),
            admin_email: env::var("ADMIN_EMAIL").unwrap_or_else(|_| {
                warn!("ADMIN_EMAIL not set, using empty value");
                String::new()
            }),
            admin_password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
                warn!("ADMIN_PASSWORD not set, using empty value");
                String::new()
            }),
            gateway_base_url: env::var("GATEWAY_BASE_URL").unwrap_or_else(|_| {
                warn!("GATEWAY_BASE_URL not set, using default");
                "https://api.razorpay.com/v1".to_string()
            }),
            gateway_key_id: env::var("GATEWAY_KEY_ID").unwrap_or_else(|_| {
                warn!("GATEWAY_KEY_ID not set, using empty value");
                String::new()
            }),
            gateway_key_secret: env::var("GATEWAY_KEY_SECRET").unwrap_or_else(|_| {
                warn!("GATEWAY_KEY_SECRET not set, using empty value");
                String::new()
            }),
            currency: env::var("CURRENCY").unwrap_or_else(|_| {
                warn!("CURRENCY not set, using default");
                "USD".to_string()
            }),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.store_url.is_empty()
            && !self.store_service_key.is_empty()
            && !self.jwt_secret.is_empty()
    }

    pub fn is_payments_configured(&self) -> bool {
        !self.gateway_base_url.is_empty()
            && !self.gateway_key_id.is_empty()
            && !self.gateway_key_secret.is_empty()
    }
}
