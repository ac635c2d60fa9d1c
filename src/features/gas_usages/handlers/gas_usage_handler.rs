use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppPath, AppQuery, ValidatedJson};
use crate::features::auth::guards::RequireAdmin;
use crate::features::gas_usages::dtos::{
    CreateGasUsageDto, GasUsageQuery, GasUsageResponseDto, UpdateGasUsageDto,
};
use crate::features::gas_usages::services::GasUsageService;
use crate::shared::batch::{BatchReport, BatchRequest};
use crate::shared::types::{ApiResponse, Meta};

#[utoipa::path(
    post,
    path = "/api/gas-usages",
    request_body = CreateGasUsageDto,
    responses(
        (status = 201, description = "Gas usage recorded", body = ApiResponse<GasUsageResponseDto>),
        (status = 400, description = "Validation error or readout below previous month"),
        (status = 404, description = "Flat not found"),
        (status = 409, description = "A record already exists for this flat and period")
    ),
    tag = "gas-usages",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn create_gas_usage(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<GasUsageService>>,
    ValidatedJson(dto): ValidatedJson<CreateGasUsageDto>,
) -> Result<(StatusCode, Json<ApiResponse<GasUsageResponseDto>>)> {
    let usage = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(usage),
            Some("Gas usage record has been created".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    post,
    path = "/api/gas-usages/multiple",
    request_body = BatchRequest,
    responses(
        (status = 201, description = "Rows processed; rejected rows are listed in errors", body = ApiResponse<BatchReport>),
        (status = 400, description = "Data is invalid or missing")
    ),
    tag = "gas-usages",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn create_gas_usages(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<GasUsageService>>,
    AppJson(request): AppJson<BatchRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BatchReport>>)> {
    let report = service.create_many(request.into_rows()?).await?;
    let message = report.summary("gas usage records");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(report), Some(message), None)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/gas-usages/building/{building_id}",
    params(("building_id" = Uuid, Path, description = "Building ID"), GasUsageQuery),
    responses(
        (status = 200, description = "Readings in the range, newest first", body = ApiResponse<Vec<GasUsageResponseDto>>),
        (status = 400, description = "Missing or malformed period")
    ),
    tag = "gas-usages",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn list_building_gas_usages(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<GasUsageService>>,
    AppPath(building_id): AppPath<Uuid>,
    AppQuery(query): AppQuery<GasUsageQuery>,
) -> Result<Json<ApiResponse<Vec<GasUsageResponseDto>>>> {
    let usages = service
        .list_for_building(building_id, query.range()?, query.status)
        .await?;
    let total = usages.len() as i64;
    Ok(Json(ApiResponse::success(Some(usages), None, Some(Meta::total(total)))))
}

#[utoipa::path(
    get,
    path = "/api/gas-usages/flat/{flat_id}",
    params(("flat_id" = Uuid, Path, description = "Flat ID"), GasUsageQuery),
    responses(
        (status = 200, description = "Readings in the range, newest first", body = ApiResponse<Vec<GasUsageResponseDto>>),
        (status = 400, description = "Missing or malformed period")
    ),
    tag = "gas-usages",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn list_flat_gas_usages(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<GasUsageService>>,
    AppPath(flat_id): AppPath<Uuid>,
    AppQuery(query): AppQuery<GasUsageQuery>,
) -> Result<Json<ApiResponse<Vec<GasUsageResponseDto>>>> {
    let usages = service
        .list_for_flat(flat_id, query.range()?, query.status)
        .await?;
    let total = usages.len() as i64;
    Ok(Json(ApiResponse::success(Some(usages), None, Some(Meta::total(total)))))
}

#[utoipa::path(
    put,
    path = "/api/gas-usages/{id}",
    params(("id" = Uuid, Path, description = "Gas usage ID")),
    request_body = UpdateGasUsageDto,
    responses(
        (status = 200, description = "Gas usage updated", body = ApiResponse<GasUsageResponseDto>),
        (status = 400, description = "Validation error or readout below previous month"),
        (status = 404, description = "Gas usage not found"),
        (status = 409, description = "Another record exists for the target period")
    ),
    tag = "gas-usages",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn update_gas_usage(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<GasUsageService>>,
    AppPath(id): AppPath<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateGasUsageDto>,
) -> Result<Json<ApiResponse<GasUsageResponseDto>>> {
    let usage = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(usage),
        Some("Gas usage record has been updated".to_string()),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/gas-usages/{id}",
    params(("id" = Uuid, Path, description = "Gas usage ID")),
    responses(
        (status = 200, description = "Gas usage deleted"),
        (status = 404, description = "Gas usage not found")
    ),
    tag = "gas-usages",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn delete_gas_usage(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<GasUsageService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Gas usage record has been deleted".to_string()),
        None,
    )))
}
