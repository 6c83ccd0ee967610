use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::store::{StoreClient, StoreError};

use crate::models::{GatewayOrder, PayableAppointment, PaymentError};
use crate::services::gateway::GatewayClient;

const PAYABLE_COLUMNS: &str = "id,amount,cancelled";

/// Bridges appointments to the payment gateway. Creates orders for
/// outstanding appointments and marks them paid after reconciliation.
pub struct PaymentService {
    store: Arc<StoreClient>,
    gateway: GatewayClient,
    currency: String,
}

impl PaymentService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: Arc::new(StoreClient::new(config)),
            gateway: GatewayClient::new(config),
            currency: config.currency.clone(),
        }
    }

    /// Creates a gateway order for an appointment. The order amount is the
    /// appointment fee in minor units and the receipt is the appointment id.
    pub async fn create_order(&self, appointment_id: Uuid) -> Result<GatewayOrder, PaymentError> {
        let appointment: Option<PayableAppointment> = self
            .store
            .select_one(&format!(
                "appointments?id=eq.{}&select={}",
                appointment_id, PAYABLE_COLUMNS
            ))
            .await
            .map_err(map_store_error)?;

        let appointment = match appointment {
            Some(a) if !a.cancelled => a,
            _ => return Err(PaymentError::AppointmentUnavailable),
        };

        let order = self
            .gateway
            .create_order(
                appointment.amount * 100,
                &self.currency,
                &appointment.id.to_string(),
            )
            .await?;

        info!(
            "Created payment order {} for appointment {}",
            order.id, appointment.id
        );
        Ok(order)
    }

    /// Reconciles an order against the gateway. Only a gateway-confirmed
    /// "paid" status flips the appointment's payment flag.
    pub async fn reconcile(&self, order_id: &str) -> Result<(), PaymentError> {
        let order = self.gateway.fetch_order(order_id).await?;

        if order.status != "paid" {
            warn!(
                "Order {} not paid (status: {}), leaving appointment untouched",
                order_id, order.status
            );
            return Err(PaymentError::NotVerified);
        }

        let appointment_id: Uuid = order
            .receipt
            .parse()
            .map_err(|_| PaymentError::BadReceipt(order.receipt.clone()))?;

        self.store
            .update(
                &format!("appointments?id=eq.{}", appointment_id),
                json!({ "payment": true }),
            )
            .await
            .map_err(map_store_error)?;

        info!(
            "Payment verified for appointment {} via order {}",
            appointment_id, order_id
        );
        Ok(())
    }
}

fn map_store_error(e: StoreError) -> PaymentError {
    match e {
        StoreError::NotFound(_) => PaymentError::AppointmentUnavailable,
        other => PaymentError::Database(other.to_string()),
    }
}
