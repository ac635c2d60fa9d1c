use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppPath, AppQuery, ValidatedJson};
use crate::features::auth::guards::RequireAdmin;
use crate::features::charges::dtos::{ChargeResponseDto, CreateChargeDto, UpdateChargeDto};
use crate::features::charges::services::ChargeService;
use crate::shared::batch::{BatchReport, BatchRequest};
use crate::shared::period::RangeQuery;
use crate::shared::types::{ApiResponse, Meta};

#[utoipa::path(
    post,
    path = "/api/contributions",
    request_body = CreateChargeDto,
    responses(
        (status = 201, description = "Contribution recorded", body = ApiResponse<ChargeResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Flat not found"),
        (status = 409, description = "A contribution already exists for this flat and period")
    ),
    tag = "contributions",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn create_contribution(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ChargeService>>,
    ValidatedJson(dto): ValidatedJson<CreateChargeDto>,
) -> Result<(StatusCode, Json<ApiResponse<ChargeResponseDto>>)> {
    let charge = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(charge),
            Some("Contribution has been created".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    post,
    path = "/api/contributions/multiple",
    request_body = BatchRequest,
    responses(
        (status = 201, description = "Rows processed; rejected rows are listed in errors", body = ApiResponse<BatchReport>),
        (status = 400, description = "Data is invalid or missing")
    ),
    tag = "contributions",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn create_contributions(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ChargeService>>,
    AppJson(request): AppJson<BatchRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BatchReport>>)> {
    let report = service.create_many(request.into_rows()?).await?;
    let message = report.summary(service.kind().plural());
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(report), Some(message), None)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/contributions/building/{building_id}",
    params(("building_id" = Uuid, Path, description = "Building ID"), RangeQuery),
    responses(
        (status = 200, description = "Contributions in the range, newest first", body = ApiResponse<Vec<ChargeResponseDto>>),
        (status = 400, description = "Missing or malformed period")
    ),
    tag = "contributions",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn list_building_contributions(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ChargeService>>,
    AppPath(building_id): AppPath<Uuid>,
    AppQuery(query): AppQuery<RangeQuery>,
) -> Result<Json<ApiResponse<Vec<ChargeResponseDto>>>> {
    let charges = service.list_for_building(building_id, query.range()?).await?;
    let total = charges.len() as i64;
    Ok(Json(ApiResponse::success(Some(charges), None, Some(Meta::total(total)))))
}

#[utoipa::path(
    get,
    path = "/api/contributions/flat/{flat_id}",
    params(("flat_id" = Uuid, Path, description = "Flat ID"), RangeQuery),
    responses(
        (status = 200, description = "Contributions in the range, newest first", body = ApiResponse<Vec<ChargeResponseDto>>),
        (status = 400, description = "Missing or malformed period")
    ),
    tag = "contributions",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn list_flat_contributions(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ChargeService>>,
    AppPath(flat_id): AppPath<Uuid>,
    AppQuery(query): AppQuery<RangeQuery>,
) -> Result<Json<ApiResponse<Vec<ChargeResponseDto>>>> {
    let charges = service.list_for_flat(flat_id, query.range()?).await?;
    let total = charges.len() as i64;
    Ok(Json(ApiResponse::success(Some(charges), None, Some(Meta::total(total)))))
}

#[utoipa::path(
    put,
    path = "/api/contributions/{id}",
    params(("id" = Uuid, Path, description = "Contribution ID")),
    request_body = UpdateChargeDto,
    responses(
        (status = 200, description = "Contribution updated", body = ApiResponse<ChargeResponseDto>),
        (status = 404, description = "Contribution not found"),
        (status = 409, description = "Another contribution exists for the target period")
    ),
    tag = "contributions",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn update_contribution(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ChargeService>>,
    AppPath(id): AppPath<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateChargeDto>,
) -> Result<Json<ApiResponse<ChargeResponseDto>>> {
    let charge = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(charge),
        Some("Contribution has been updated".to_string()),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/contributions/{id}",
    params(("id" = Uuid, Path, description = "Contribution ID")),
    responses(
        (status = 200, description = "Contribution deleted"),
        (status = 404, description = "Contribution not found")
    ),
    tag = "contributions",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn delete_contribution(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ChargeService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Contribution has been deleted".to_string()),
        None,
    )))
}
