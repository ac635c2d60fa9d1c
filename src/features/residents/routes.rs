use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::residents::handlers;
use crate::features::residents::state::ResidentServices;

pub fn routes(services: Arc<ResidentServices>) -> Router {
    Router::new()
        .route("/api/me/monthly-summary", get(handlers::monthly_summary))
        .route("/api/me/yearly-chart-data", get(handlers::yearly_chart))
        .route("/api/me/bills", get(handlers::bills))
        .route("/api/me/bills/remaining", get(handlers::bills_remaining))
        .route("/api/me/gas-usages", get(handlers::gas_usages))
        .route("/api/me/contributions", get(handlers::contributions))
        .route("/api/me/service-charges", get(handlers::service_charges))
        .with_state(services)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::bills::BillService;
    use crate::features::buildings::BuildingService;
    use crate::features::charges::{ChargeKind, ChargeService};
    use crate::features::dashboard::DashboardService;
    use crate::features::flats::FlatService;
    use crate::features::gas_usages::GasUsageService;
    use crate::shared::test_helpers::{lazy_pool, with_admin_auth, with_resident_auth};
    use axum::http::StatusCode;
    use axum_test::TestServer;

    fn router() -> Router {
        let pool = lazy_pool();
        routes(Arc::new(ResidentServices {
            dashboard: Arc::new(DashboardService::new(
                pool.clone(),
                Arc::new(BuildingService::new(pool.clone())),
                Arc::new(FlatService::new(pool.clone())),
            )),
            bills: Arc::new(BillService::new(pool.clone())),
            gas_usages: Arc::new(GasUsageService::new(pool.clone())),
            contributions: Arc::new(ChargeService::new(pool.clone(), ChargeKind::Contribution)),
            service_charges: Arc::new(ChargeService::new(pool, ChargeKind::ServiceCharge)),
        }))
    }

    #[tokio::test]
    async fn test_admins_are_not_residents() {
        let server = TestServer::new(with_admin_auth(router())).unwrap();
        for path in ["/api/me/monthly-summary", "/api/me/bills", "/api/me/bills/remaining"] {
            server.get(path).await.assert_status(StatusCode::FORBIDDEN);
        }
    }

    #[tokio::test]
    async fn test_anonymous_callers_are_rejected() {
        let server = TestServer::new(router()).unwrap();
        server
            .get("/api/me/gas-usages?starting=2025-01&ending=2025-06")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_resident_ranges_are_validated() {
        let server = TestServer::new(with_resident_auth(router())).unwrap();
        server
            .get("/api/me/contributions?starting=2025-01")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        server
            .get("/api/me/service-charges?starting=2025-01&ending=2025-99")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        server
            .get("/api/me/yearly-chart-data?year=abc")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
