use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use gantry_core::health::{healthz, readyz};
use gantry_core::middleware::request_id_layer;

use crate::handlers::{
    account::{get_profile, login, register},
    password::{reset_password, send_reset_email},
    verification::{send_verify_email, verify_email},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Accounts
        .route("/accounts", post(register))
        .route("/accounts/login", post(login))
        .route("/accounts/@me", get(get_profile))
        // Password reset
        .route("/accounts/password/email", post(send_reset_email))
        .route("/accounts/password/reset", post(reset_password))
        // Email verification
        .route("/accounts/verification/email", post(send_verify_email))
        .route("/accounts/verification", post(verify_email))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
