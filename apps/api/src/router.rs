use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use admin_cell::router::admin_routes;
use appointment_cell::router::appointment_routes;
use auth_cell::router::auth_routes;
use doctor_cell::router::doctor_routes;
use payment_cell::router::payment_routes;
use profile_cell::router::profile_routes;
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    let user_routes = Router::new()
        .merge(auth_routes(state.clone()))
        .merge(profile_routes(state.clone()))
        .merge(appointment_routes(state.clone()));

    Router::new()
        .route("/", get(|| async { "MediBook API is running!" }))
        .nest("/api/user", user_routes)
        .nest("/api/doctor", doctor_routes(state.clone()))
        .nest("/api/payment", payment_routes(state.clone()))
        .nest("/api/admin", admin_routes(state))
}
