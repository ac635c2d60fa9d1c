use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::features::bills::{handlers::bill_handler, services::BillService};

pub fn routes(service: Arc<BillService>) -> Router {
    Router::new()
        .route(
            "/api/bills",
            post(bill_handler::create_bill).get(bill_handler::list_bills),
        )
        .route("/api/bills/upload", post(bill_handler::upload_bills))
        .route("/api/bills/flat/{flat_id}", get(bill_handler::list_flat_bills))
        .route(
            "/api/bills/flat/remaining/{flat_id}",
            get(bill_handler::flat_bill_remaining),
        )
        .route(
            "/api/bills/{id}",
            put(bill_handler::update_bill).delete(bill_handler::delete_bill),
        )
        .with_state(service)
}
