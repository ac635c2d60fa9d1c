use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::admins::{handlers::admin_handler, services::AdminService};

pub fn routes(service: Arc<AdminService>) -> Router {
    Router::new()
        .route(
            "/api/admins",
            post(admin_handler::create_admin).get(admin_handler::list_admins),
        )
        .route(
            "/api/admins/{id}",
            get(admin_handler::get_admin).delete(admin_handler::delete_admin),
        )
        .with_state(service)
}
