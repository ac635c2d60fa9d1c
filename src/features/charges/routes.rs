use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::features::charges::handlers::{contribution_handler, service_charge_handler};
use crate::features::charges::services::ChargeService;

pub fn contribution_routes(service: Arc<ChargeService>) -> Router {
    Router::new()
        .route("/api/contributions", post(contribution_handler::create_contribution))
        .route(
            "/api/contributions/multiple",
            post(contribution_handler::create_contributions),
        )
        .route(
            "/api/contributions/building/{building_id}",
            get(contribution_handler::list_building_contributions),
        )
        .route(
            "/api/contributions/flat/{flat_id}",
            get(contribution_handler::list_flat_contributions),
        )
        .route(
            "/api/contributions/{id}",
            put(contribution_handler::update_contribution)
                .delete(contribution_handler::delete_contribution),
        )
        .with_state(service)
}

pub fn service_charge_routes(service: Arc<ChargeService>) -> Router {
    Router::new()
        .route(
            "/api/service-charges",
            post(service_charge_handler::create_service_charge),
        )
        .route(
            "/api/service-charges/multiple",
            post(service_charge_handler::create_service_charges),
        )
        .route(
            "/api/service-charges/building/{building_id}",
            get(service_charge_handler::list_building_service_charges),
        )
        .route(
            "/api/service-charges/flat/{flat_id}",
            get(service_charge_handler::list_flat_service_charges),
        )
        .route(
            "/api/service-charges/{id}",
            put(service_charge_handler::update_service_charge)
                .delete(service_charge_handler::delete_service_charge),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::charges::ChargeKind;
    use crate::shared::test_helpers::{lazy_pool, with_admin_auth, with_resident_auth};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    fn server() -> TestServer {
        let pool = lazy_pool();
        let router = contribution_routes(Arc::new(ChargeService::new(
            pool.clone(),
            ChargeKind::Contribution,
        )))
        .merge(service_charge_routes(Arc::new(ChargeService::new(
            pool,
            ChargeKind::ServiceCharge,
        ))));
        TestServer::new(with_admin_auth(router)).unwrap()
    }

    #[tokio::test]
    async fn test_bulk_summary_uses_kind_noun() {
        let response = server()
            .post("/api/service-charges/multiple")
            .json(&json!({ "data": [{ "month": 1 }] }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: serde_json::Value = response.json();
        assert_eq!(body["message"], "0 service charges have been created");
        assert_eq!(body["data"]["errors"][0].as_str().map(|m| m.starts_with("Entry 1:")), Some(true));
    }

    #[tokio::test]
    async fn test_range_is_required() {
        server()
            .get("/api/contributions/building/7f1a3c44-5d2e-4b8f-9a10-2b3c4d5e6f70")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_residents_cannot_record_charges() {
        let router = contribution_routes(Arc::new(ChargeService::new(
            lazy_pool(),
            ChargeKind::Contribution,
        )));
        let server = TestServer::new(with_resident_auth(router)).unwrap();
        server
            .post("/api/contributions")
            .json(&json!({
                "flatId": "7f1a3c44-5d2e-4b8f-9a10-2b3c4d5e6f70",
                "month": 1,
                "year": 2024,
                "amount": 100
            }))
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }
}
