use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::buildings::{handlers::building_handler, services::BuildingService};

pub fn routes(service: Arc<BuildingService>) -> Router {
    Router::new()
        .route(
            "/api/buildings",
            post(building_handler::create_building).get(building_handler::list_buildings),
        )
        .route(
            "/api/buildings/{id}",
            get(building_handler::get_building)
                .put(building_handler::update_building)
                .delete(building_handler::delete_building),
        )
        .with_state(service)
}
