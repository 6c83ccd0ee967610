use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Order as the gateway reports it. The receipt carries the appointment
/// id and is the only correlation handle between the two systems.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    pub appointment_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyPaymentRequest {
    pub order_id: String,
}

/// The slim appointment view payments need: the fee and whether the
/// appointment still stands.
#[derive(Debug, Clone, Deserialize)]
pub struct PayableAppointment {
    pub id: Uuid,
    pub amount: i64,
    pub cancelled: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("Appointment cancelled or does not exist")]
    AppointmentUnavailable,

    #[error("Payment not verified")]
    NotVerified,

    #[error("Gateway order has no valid receipt: {0}")]
    BadReceipt(String),

    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Database error: {0}")]
    Database(String),
}
