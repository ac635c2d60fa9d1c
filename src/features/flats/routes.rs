use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::flats::{handlers::flat_handler, services::FlatService};

pub fn routes(service: Arc<FlatService>) -> Router {
    Router::new()
        .route(
            "/api/flats",
            post(flat_handler::create_flat).get(flat_handler::list_flats),
        )
        .route(
            "/api/flats/building/{building_id}",
            get(flat_handler::list_flats_by_building),
        )
        .route(
            "/api/flats/{id}",
            get(flat_handler::get_flat)
                .put(flat_handler::update_flat)
                .delete(flat_handler::delete_flat),
        )
        .with_state(service)
}
