use crate::features::auth::handlers::auth_handler;
use crate::features::auth::services::AuthService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Sign-up, sign-in and sign-out (no session required)
pub fn public_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/auth/admin-sign-up", post(auth_handler::admin_sign_up))
        .route("/api/auth/admin-sign-in", post(auth_handler::admin_sign_in))
        .route("/api/auth/flat-sign-in", post(auth_handler::flat_sign_in))
        .route("/api/auth/admin-sign-out", post(auth_handler::admin_sign_out))
        .route("/api/auth/flat-sign-out", post(auth_handler::flat_sign_out))
        .with_state(service)
}

/// Session checks (behind `auth_middleware`)
pub fn protected_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/auth/admin-auth-check", get(auth_handler::admin_auth_check))
        .route("/api/auth/flat-auth-check", get(auth_handler::flat_auth_check))
        .with_state(service)
}
