use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::{AppPath, AppQuery, ValidatedJson};
use crate::features::auth::guards::RequireAdmin;
use crate::features::cylinders::dtos::{CreatePurchaseLogDto, PurchaseLogResponseDto, UpdatePurchaseLogDto};
use crate::features::cylinders::services::PurchaseLogService;
use crate::shared::period::RangeQuery;
use crate::shared::types::{ApiResponse, Meta};

#[utoipa::path(
    post,
    path = "/api/cylinder-pls",
    request_body = CreatePurchaseLogDto,
    responses(
        (status = 201, description = "Cylinder purchase log recorded", body = ApiResponse<PurchaseLogResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Building not found"),
        (status = 409, description = "A cylinder purchase log already exists for this building and period")
    ),
    tag = "cylinder-purchases",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn create_purchase_log(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<PurchaseLogService>>,
    ValidatedJson(dto): ValidatedJson<CreatePurchaseLogDto>,
) -> Result<(StatusCode, Json<ApiResponse<PurchaseLogResponseDto>>)> {
    let log = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(log),
            Some("Cylinder purchase log has been created".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/cylinder-pls/building/{building_id}",
    params(("building_id" = Uuid, Path, description = "Building ID"), RangeQuery),
    responses(
        (status = 200, description = "Logs in the range, newest first", body = ApiResponse<Vec<PurchaseLogResponseDto>>),
        (status = 400, description = "Missing or malformed period")
    ),
    tag = "cylinder-purchases",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn list_building_purchase_logs(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<PurchaseLogService>>,
    AppPath(building_id): AppPath<Uuid>,
    AppQuery(query): AppQuery<RangeQuery>,
) -> Result<Json<ApiResponse<Vec<PurchaseLogResponseDto>>>> {
    let logs = service.list_for_building(building_id, query.range()?).await?;
    let total = logs.len() as i64;
    Ok(Json(ApiResponse::success(Some(logs), None, Some(Meta::total(total)))))
}

#[utoipa::path(
    put,
    path = "/api/cylinder-pls/{id}",
    params(("id" = Uuid, Path, description = "Cylinder purchase log ID")),
    request_body = UpdatePurchaseLogDto,
    responses(
        (status = 200, description = "Cylinder purchase log updated", body = ApiResponse<PurchaseLogResponseDto>),
        (status = 404, description = "Cylinder purchase log not found"),
        (status = 409, description = "Another log exists for the target period")
    ),
    tag = "cylinder-purchases",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn update_purchase_log(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<PurchaseLogService>>,
    AppPath(id): AppPath<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdatePurchaseLogDto>,
) -> Result<Json<ApiResponse<PurchaseLogResponseDto>>> {
    let log = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(log),
        Some("Cylinder purchase log has been updated".to_string()),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/cylinder-pls/{id}",
    params(("id" = Uuid, Path, description = "Cylinder purchase log ID")),
    responses(
        (status = 200, description = "Cylinder purchase log deleted"),
        (status = 404, description = "Cylinder purchase log not found")
    ),
    tag = "cylinder-purchases",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn delete_purchase_log(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<PurchaseLogService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Cylinder purchase log has been deleted".to_string()),
        None,
    )))
}
