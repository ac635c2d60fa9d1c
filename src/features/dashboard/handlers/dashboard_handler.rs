use axum::{extract::State, Json};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::{AppPath, AppQuery};
use crate::features::auth::guards::RequireAdmin;
use crate::features::dashboard::dtos::*;
use crate::features::dashboard::services::DashboardService;
use crate::shared::period::{MonthYearQuery, YearQuery};
use crate::shared::types::ApiResponse;

/// Building totals for one month
#[utoipa::path(
    get,
    path = "/api/dash/monthly-building-summary/{building_id}",
    params(("building_id" = Uuid, Path, description = "Building ID"), MonthYearQuery),
    responses(
        (status = 200, description = "Monthly building summary", body = ApiResponse<MonthlyBuildingSummaryDto>),
        (status = 400, description = "Invalid month or year"),
        (status = 404, description = "Building not found or has no flats")
    ),
    tag = "dashboard",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn monthly_building_summary(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<DashboardService>>,
    AppPath(building_id): AppPath<Uuid>,
    AppQuery(query): AppQuery<MonthYearQuery>,
) -> Result<Json<ApiResponse<MonthlyBuildingSummaryDto>>> {
    let summary = service
        .monthly_building_summary(building_id, query.period()?)
        .await?;
    Ok(Json(ApiResponse::success(Some(summary), None, None)))
}

/// Flat records for one month
#[utoipa::path(
    get,
    path = "/api/dash/monthly-flat-summary/{flat_id}",
    params(("flat_id" = Uuid, Path, description = "Flat ID"), MonthYearQuery),
    responses(
        (status = 200, description = "Monthly flat summary", body = ApiResponse<MonthlyFlatSummaryDto>),
        (status = 400, description = "Invalid month or year"),
        (status = 404, description = "Flat not found")
    ),
    tag = "dashboard",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn monthly_flat_summary(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<DashboardService>>,
    AppPath(flat_id): AppPath<Uuid>,
    AppQuery(query): AppQuery<MonthYearQuery>,
) -> Result<Json<ApiResponse<MonthlyFlatSummaryDto>>> {
    let summary = service.monthly_flat_summary(flat_id, query.period()?).await?;
    Ok(Json(ApiResponse::success(Some(summary), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/dash/yearly-building-chart-data/{building_id}",
    params(("building_id" = Uuid, Path, description = "Building ID"), YearQuery),
    responses(
        (status = 200, description = "Twelve zero-filled points per chart", body = ApiResponse<YearlyBuildingChartDto>),
        (status = 400, description = "Invalid year"),
        (status = 404, description = "Building not found or has no flats")
    ),
    tag = "dashboard",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn yearly_building_chart(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<DashboardService>>,
    AppPath(building_id): AppPath<Uuid>,
    AppQuery(query): AppQuery<YearQuery>,
) -> Result<Json<ApiResponse<YearlyBuildingChartDto>>> {
    let chart = service.yearly_building_chart(building_id, query.year()?).await?;
    Ok(Json(ApiResponse::success(Some(chart), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/dash/yearly-flat-chart-data/{flat_id}",
    params(("flat_id" = Uuid, Path, description = "Flat ID"), YearQuery),
    responses(
        (status = 200, description = "Twelve zero-filled points per chart", body = ApiResponse<YearlyFlatChartDto>),
        (status = 400, description = "Invalid year"),
        (status = 404, description = "Flat not found")
    ),
    tag = "dashboard",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn yearly_flat_chart(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<DashboardService>>,
    AppPath(flat_id): AppPath<Uuid>,
    AppQuery(query): AppQuery<YearQuery>,
) -> Result<Json<ApiResponse<YearlyFlatChartDto>>> {
    let chart = service.yearly_flat_chart(flat_id, query.year()?).await?;
    Ok(Json(ApiResponse::success(Some(chart), None, None)))
}
