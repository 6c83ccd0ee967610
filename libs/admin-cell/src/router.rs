use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::{auth_middleware, require_admin};

use crate::handlers;

/// Admin login is open; everything else requires an admin token.
pub fn admin_routes(state: Arc<AppConfig>) -> Router {
    let public_routes = Router::new().route("/login", post(auth_cell::handlers::admin_login));

    let protected_routes = Router::new()
        .route("/add-doctor", post(handlers::add_doctor))
        .route("/doctors", get(handlers::all_doctors))
        .route("/appointments", get(handlers::all_appointments))
        .route("/cancel-appointment", post(handlers::cancel_appointment))
        .route("/dashboard", get(handlers::dashboard))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
