use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::{AppPath, AppQuery, ValidatedJson};
use crate::features::auth::guards::RequireAdmin;
use crate::features::cylinders::dtos::{CreateUsageLogDto, UsageLogResponseDto, UpdateUsageLogDto};
use crate::features::cylinders::services::UsageLogService;
use crate::shared::period::RangeQuery;
use crate::shared::types::{ApiResponse, Meta};

#[utoipa::path(
    post,
    path = "/api/cylinder-uls",
    request_body = CreateUsageLogDto,
    responses(
        (status = 201, description = "Cylinder usage log recorded", body = ApiResponse<UsageLogResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Building not found"),
        (status = 409, description = "A cylinder usage log already exists for this building and period")
    ),
    tag = "cylinder-usages",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn create_usage_log(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<UsageLogService>>,
    ValidatedJson(dto): ValidatedJson<CreateUsageLogDto>,
) -> Result<(StatusCode, Json<ApiResponse<UsageLogResponseDto>>)> {
    let log = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(log),
            Some("Cylinder usage log has been created".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/cylinder-uls/building/{building_id}",
    params(("building_id" = Uuid, Path, description = "Building ID"), RangeQuery),
    responses(
        (status = 200, description = "Logs in the range, newest first", body = ApiResponse<Vec<UsageLogResponseDto>>),
        (status = 400, description = "Missing or malformed period")
    ),
    tag = "cylinder-usages",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn list_building_usage_logs(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<UsageLogService>>,
    AppPath(building_id): AppPath<Uuid>,
    AppQuery(query): AppQuery<RangeQuery>,
) -> Result<Json<ApiResponse<Vec<UsageLogResponseDto>>>> {
    let logs = service.list_for_building(building_id, query.range()?).await?;
    let total = logs.len() as i64;
    Ok(Json(ApiResponse::success(Some(logs), None, Some(Meta::total(total)))))
}

#[utoipa::path(
    put,
    path = "/api/cylinder-uls/{id}",
    params(("id" = Uuid, Path, description = "Cylinder usage log ID")),
    request_body = UpdateUsageLogDto,
    responses(
        (status = 200, description = "Cylinder usage log updated", body = ApiResponse<UsageLogResponseDto>),
        (status = 404, description = "Cylinder usage log not found"),
        (status = 409, description = "Another log exists for the target period")
    ),
    tag = "cylinder-usages",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn update_usage_log(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<UsageLogService>>,
    AppPath(id): AppPath<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateUsageLogDto>,
) -> Result<Json<ApiResponse<UsageLogResponseDto>>> {
    let log = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(log),
        Some("Cylinder usage log has been updated".to_string()),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/cylinder-uls/{id}",
    params(("id" = Uuid, Path, description = "Cylinder usage log ID")),
    responses(
        (status = 200, description = "Cylinder usage log deleted"),
        (status = 404, description = "Cylinder usage log not found")
    ),
    tag = "cylinder-usages",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn delete_usage_log(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<UsageLogService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Cylinder usage log has been deleted".to_string()),
        None,
    )))
}
