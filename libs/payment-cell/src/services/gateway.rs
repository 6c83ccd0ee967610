use reqwest::Client;
use serde_json::json;
use tracing::{debug, error, info};

use shared_config::AppConfig;

use crate::models::{GatewayOrder, PaymentError};

/// Payment gateway client. Orders are authenticated with the configured
/// key pair over basic auth; amounts are in minor units.
pub struct GatewayClient {
    client: Client,
    base_url: String,
    key_id: String,
    key_secret: String,
}

impl GatewayClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.gateway_base_url.clone(),
            key_id: config.gateway_key_id.clone(),
            key_secret: config.gateway_key_secret.clone(),
        }
    }

    pub async fn create_order(
        &self,
        amount_minor: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, PaymentError> {
        let url = format!("{}/orders", self.base_url);
        debug!("Creating gateway order at {} for receipt {}", url, receipt);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&json!({
                "amount": amount_minor,
                "currency": currency,
                "receipt": receipt
            }))
            .send()
            .await
            .map_err(|e| PaymentError::Gateway(e.to_string()))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| PaymentError::Gateway(e.to_string()))?;

        if !status.is_success() {
            error!("Gateway order creation failed: {} - {}", status, response_text);
            return Err(PaymentError::Gateway(format!(
                "HTTP {}: {}",
                status, response_text
            )));
        }

        let order: GatewayOrder = serde_json::from_str(&response_text)
            .map_err(|e| PaymentError::Gateway(format!("Failed to parse order response: {}", e)))?;

        info!("Created gateway order {} for receipt {}", order.id, receipt);
        Ok(order)
    }

    pub async fn fetch_order(&self, order_id: &str) -> Result<GatewayOrder, PaymentError> {
        let url = format!("{}/orders/{}", self.base_url, order_id);
        debug!("Fetching gateway order {}", order_id);

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .send()
            .await
            .map_err(|e| PaymentError::Gateway(e.to_string()))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| PaymentError::Gateway(e.to_string()))?;

        if !status.is_success() {
            error!("Gateway order fetch failed: {} - {}", status, response_text);
            return Err(PaymentError::Gateway(format!(
                "HTTP {}: {}",
                status, response_text
            )));
        }

        serde_json::from_str(&response_text)
            .map_err(|e| PaymentError::Gateway(format!("Failed to parse order response: {}", e)))
    }
}
