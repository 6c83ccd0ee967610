use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{CreateOrderRequest, PaymentError, VerifyPaymentRequest};
use crate::services::payment::PaymentService;

fn map_payment_error(e: PaymentError) -> AppError {
    match e {
        PaymentError::AppointmentUnavailable => {
            AppError::Unavailable("Appointment cancelled or does not exist".to_string())
        }
        PaymentError::NotVerified => AppError::Gateway("Payment not verified".to_string()),
        PaymentError::BadReceipt(msg) => {
            AppError::Gateway(format!("Gateway order has no valid receipt: {}", msg))
        }
        PaymentError::Gateway(msg) => AppError::Gateway(msg),
        PaymentError::Database(msg) => AppError::Database(msg),
    }
}

#[axum::debug_handler]
pub async fn create_order(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<Json<Value>, AppError> {
    let payments = PaymentService::new(&state);

    let order = payments
        .create_order(request.appointment_id)
        .await
        .map_err(map_payment_error)?;

    Ok(Json(json!({
        "success": true,
        "order": order
    })))
}

#[axum::debug_handler]
pub async fn verify_payment(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<VerifyPaymentRequest>,
) -> Result<Json<Value>, AppError> {
    let payments = PaymentService::new(&state);

    payments
        .reconcile(&request.order_id)
        .await
        .map_err(map_payment_error)?;

    Ok(Json(json!({
        "success": true,
        "message": "Payment verified"
    })))
}
