use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::dashboard::handlers;
use crate::features::dashboard::services::DashboardService;

pub fn routes(dashboard_service: Arc<DashboardService>) -> Router {
    Router::new()
        .route(
            "/api/dash/monthly-building-summary/{building_id}",
            get(handlers::monthly_building_summary),
        )
        .route(
            "/api/dash/monthly-flat-summary/{flat_id}",
            get(handlers::monthly_flat_summary),
        )
        .route(
            "/api/dash/yearly-building-chart-data/{building_id}",
            get(handlers::yearly_building_chart),
        )
        .route(
            "/api/dash/yearly-flat-chart-data/{flat_id}",
            get(handlers::yearly_flat_chart),
        )
        .with_state(dashboard_service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::buildings::BuildingService;
    use crate::features::flats::FlatService;
    use crate::shared::test_helpers::{lazy_pool, with_admin_auth, with_resident_auth};
    use axum::http::StatusCode;
    use axum_test::TestServer;

    const BUILDING_ID: &str = "7f1a3c44-5d2e-4b8f-9a10-2b3c4d5e6f70";

    fn router() -> Router {
        let pool = lazy_pool();
        routes(Arc::new(DashboardService::new(
            pool.clone(),
            Arc::new(BuildingService::new(pool.clone())),
            Arc::new(FlatService::new(pool)),
        )))
    }

    #[tokio::test]
    async fn test_non_numeric_month_is_rejected() {
        let server = TestServer::new(with_admin_auth(router())).unwrap();
        server
            .get(&format!("/api/dash/monthly-building-summary/{}?month=june", BUILDING_ID))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_month_out_of_range_is_rejected() {
        let server = TestServer::new(with_admin_auth(router())).unwrap();
        let response = server
            .get(&format!("/api/dash/monthly-flat-summary/{}?month=13&year=2025", BUILDING_ID))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_year_out_of_range_is_rejected() {
        let server = TestServer::new(with_admin_auth(router())).unwrap();
        server
            .get(&format!("/api/dash/yearly-flat-chart-data/{}?year=99", BUILDING_ID))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_residents_cannot_open_the_dashboard() {
        let server = TestServer::new(with_resident_auth(router())).unwrap();
        server
            .get(&format!("/api/dash/yearly-building-chart-data/{}", BUILDING_ID))
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }
}
