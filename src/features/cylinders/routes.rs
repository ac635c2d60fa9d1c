use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::features::cylinders::handlers::{purchase_handler, usage_handler};
use crate::features::cylinders::services::{PurchaseLogService, UsageLogService};

pub fn purchase_routes(service: Arc<PurchaseLogService>) -> Router {
    Router::new()
        .route("/api/cylinder-pls", post(purchase_handler::create_purchase_log))
        .route(
            "/api/cylinder-pls/building/{building_id}",
            get(purchase_handler::list_building_purchase_logs),
        )
        .route(
            "/api/cylinder-pls/{id}",
            put(purchase_handler::update_purchase_log).delete(purchase_handler::delete_purchase_log),
        )
        .with_state(service)
}

pub fn usage_routes(service: Arc<UsageLogService>) -> Router {
    Router::new()
        .route("/api/cylinder-uls", post(usage_handler::create_usage_log))
        .route(
            "/api/cylinder-uls/building/{building_id}",
            get(usage_handler::list_building_usage_logs),
        )
        .route(
            "/api/cylinder-uls/{id}",
            put(usage_handler::update_usage_log).delete(usage_handler::delete_usage_log),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{lazy_pool, with_admin_auth, with_resident_auth};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    const BUILDING_ID: &str = "7f1a3c44-5d2e-4b8f-9a10-2b3c4d5e6f70";

    fn server() -> TestServer {
        let pool = lazy_pool();
        let router = purchase_routes(Arc::new(PurchaseLogService::new(pool.clone())))
            .merge(usage_routes(Arc::new(UsageLogService::new(pool))));
        TestServer::new(with_admin_auth(router)).unwrap()
    }

    #[tokio::test]
    async fn test_purchase_without_dealer_is_rejected() {
        let response = server()
            .post("/api/cylinder-pls")
            .json(&json!({
                "building": BUILDING_ID,
                "month": 4,
                "year": 2025,
                "cylindersPurchased": 5,
                "dealer": "",
                "cost": 7250
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_negative_unit_cost_is_rejected() {
        let response = server()
            .post("/api/cylinder-uls")
            .json(&json!({
                "buildingId": BUILDING_ID,
                "month": 4,
                "year": 2025,
                "cylindersUsed": 3,
                "unitCost": -1
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_listing_requires_a_range() {
        server()
            .get(&format!("/api/cylinder-uls/building/{}?starting=2025-01", BUILDING_ID))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_residents_cannot_read_cylinder_logs() {
        let router = purchase_routes(Arc::new(PurchaseLogService::new(lazy_pool())));
        let server = TestServer::new(with_resident_auth(router)).unwrap();
        server
            .get(&format!(
                "/api/cylinder-pls/building/{}?starting=2025-01&ending=2025-03",
                BUILDING_ID
            ))
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }
}
