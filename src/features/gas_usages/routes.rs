use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::features::gas_usages::{handlers::gas_usage_handler, services::GasUsageService};

pub fn routes(service: Arc<GasUsageService>) -> Router {
    Router::new()
        .route("/api/gas-usages", post(gas_usage_handler::create_gas_usage))
        .route(
            "/api/gas-usages/multiple",
            post(gas_usage_handler::create_gas_usages),
        )
        .route(
            "/api/gas-usages/building/{building_id}",
            get(gas_usage_handler::list_building_gas_usages),
        )
        .route(
            "/api/gas-usages/flat/{flat_id}",
            get(gas_usage_handler::list_flat_gas_usages),
        )
        .route(
            "/api/gas-usages/{id}",
            put(gas_usage_handler::update_gas_usage).delete(gas_usage_handler::delete_gas_usage),
        )
        .with_state(service)
}
