use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::error::Result;
use crate::core::extractor::AppQuery;
use crate::features::auth::guards::RequireResident;
use crate::features::bills::dtos::{BillRemainingDto, BillResponseDto, FlatBillQuery};
use crate::features::charges::dtos::ChargeResponseDto;
use crate::features::dashboard::dtos::{MonthlyFlatSummaryDto, YearlyFlatChartDto};
use crate::features::gas_usages::dtos::{GasUsageQuery, GasUsageResponseDto};
use crate::features::residents::state::ResidentServices;
use crate::shared::period::{MonthYearQuery, RangeQuery, YearQuery};
use crate::shared::types::{ApiResponse, Meta};

#[utoipa::path(
    get,
    path = "/api/me/monthly-summary",
    params(MonthYearQuery),
    responses(
        (status = 200, description = "Monthly summary of the signed-in flat", body = ApiResponse<MonthlyFlatSummaryDto>),
        (status = 400, description = "Invalid month or year"),
        (status = 403, description = "Flat resident access required")
    ),
    tag = "me",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn monthly_summary(
    RequireResident(resident): RequireResident,
    State(services): State<Arc<ResidentServices>>,
    AppQuery(query): AppQuery<MonthYearQuery>,
) -> Result<Json<ApiResponse<MonthlyFlatSummaryDto>>> {
    let summary = services
        .dashboard
        .monthly_flat_summary(resident.flat_id, query.period()?)
        .await?;
    Ok(Json(ApiResponse::success(Some(summary), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/me/yearly-chart-data",
    params(YearQuery),
    responses(
        (status = 200, description = "Twelve zero-filled points per chart", body = ApiResponse<YearlyFlatChartDto>),
        (status = 400, description = "Invalid year")
    ),
    tag = "me",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn yearly_chart(
    RequireResident(resident): RequireResident,
    State(services): State<Arc<ResidentServices>>,
    AppQuery(query): AppQuery<YearQuery>,
) -> Result<Json<ApiResponse<YearlyFlatChartDto>>> {
    let chart = services
        .dashboard
        .yearly_flat_chart(resident.flat_id, query.year()?)
        .await?;
    Ok(Json(ApiResponse::success(Some(chart), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/me/bills",
    params(FlatBillQuery),
    responses(
        (status = 200, description = "Bills of the signed-in flat", body = ApiResponse<Vec<BillResponseDto>>)
    ),
    tag = "me",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn bills(
    RequireResident(resident): RequireResident,
    State(services): State<Arc<ResidentServices>>,
    AppQuery(query): AppQuery<FlatBillQuery>,
) -> Result<Json<ApiResponse<Vec<BillResponseDto>>>> {
    let pagination = query.pagination();
    let (bills, total) = services
        .bills
        .list_for_flat(resident.flat_id, query.unpaid, pagination.as_ref())
        .await?;
    Ok(Json(ApiResponse::success(
        Some(bills),
        None,
        Some(Meta::list(total, pagination.as_ref())),
    )))
}

#[utoipa::path(
    get,
    path = "/api/me/bills/remaining",
    responses(
        (status = 200, description = "Outstanding bill total of the signed-in flat", body = ApiResponse<BillRemainingDto>)
    ),
    tag = "me",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn bills_remaining(
    RequireResident(resident): RequireResident,
    State(services): State<Arc<ResidentServices>>,
) -> Result<Json<ApiResponse<BillRemainingDto>>> {
    let remaining = services.bills.remaining_for_flat(resident.flat_id).await?;
    Ok(Json(ApiResponse::success(Some(remaining), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/me/gas-usages",
    params(GasUsageQuery),
    responses(
        (status = 200, description = "Gas records in the range, newest first", body = ApiResponse<Vec<GasUsageResponseDto>>),
        (status = 400, description = "Missing or malformed period")
    ),
    tag = "me",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn gas_usages(
    RequireResident(resident): RequireResident,
    State(services): State<Arc<ResidentServices>>,
    AppQuery(query): AppQuery<GasUsageQuery>,
) -> Result<Json<ApiResponse<Vec<GasUsageResponseDto>>>> {
    let usages = services
        .gas_usages
        .list_for_flat(resident.flat_id, query.range()?, query.status)
        .await?;
    let total = usages.len() as i64;
    Ok(Json(ApiResponse::success(Some(usages), None, Some(Meta::total(total)))))
}

#[utoipa::path(
    get,
    path = "/api/me/contributions",
    params(RangeQuery),
    responses(
        (status = 200, description = "Contributions in the range, newest first", body = ApiResponse<Vec<ChargeResponseDto>>),
        (status = 400, description = "Missing or malformed period")
    ),
    tag = "me",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn contributions(
    RequireResident(resident): RequireResident,
    State(services): State<Arc<ResidentServices>>,
    AppQuery(query): AppQuery<RangeQuery>,
) -> Result<Json<ApiResponse<Vec<ChargeResponseDto>>>> {
    let charges = services
        .contributions
        .list_for_flat(resident.flat_id, query.range()?)
        .await?;
    let total = charges.len() as i64;
    Ok(Json(ApiResponse::success(Some(charges), None, Some(Meta::total(total)))))
}

#[utoipa::path(
    get,
    path = "/api/me/service-charges",
    params(RangeQuery),
    responses(
        (status = 200, description = "Service charges in the range, newest first", body = ApiResponse<Vec<ChargeResponseDto>>),
        (status = 400, description = "Missing or malformed period")
    ),
    tag = "me",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn service_charges(
    RequireResident(resident): RequireResident,
    State(services): State<Arc<ResidentServices>>,
    AppQuery(query): AppQuery<RangeQuery>,
) -> Result<Json<ApiResponse<Vec<ChargeResponseDto>>>> {
    let charges = services
        .service_charges
        .list_for_flat(resident.flat_id, query.range()?)
        .await?;
    let total = charges.len() as i64;
    Ok(Json(ApiResponse::success(Some(charges), None, Some(Meta::total(total)))))
}
