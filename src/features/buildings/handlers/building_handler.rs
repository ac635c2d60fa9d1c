use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::{AppPath, ValidatedJson};
use crate::features::auth::guards::RequireAdmin;
use crate::features::buildings::dtos::{BuildingResponseDto, CreateBuildingDto, UpdateBuildingDto};
use crate::features::buildings::services::BuildingService;
use crate::shared::types::{ApiResponse, Meta};

#[utoipa::path(
    post,
    path = "/api/buildings",
    request_body = CreateBuildingDto,
    responses(
        (status = 201, description = "Building created", body = ApiResponse<BuildingResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Building number already exists")
    ),
    tag = "buildings",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn create_building(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<BuildingService>>,
    ValidatedJson(dto): ValidatedJson<CreateBuildingDto>,
) -> Result<(StatusCode, Json<ApiResponse<BuildingResponseDto>>)> {
    let building = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(building),
            Some("Building created".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/buildings",
    responses(
        (status = 200, description = "All buildings", body = ApiResponse<Vec<BuildingResponseDto>>)
    ),
    tag = "buildings",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn list_buildings(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<BuildingService>>,
) -> Result<Json<ApiResponse<Vec<BuildingResponseDto>>>> {
    let buildings = service.list().await?;
    let total = buildings.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(buildings),
        None,
        Some(Meta::total(total)),
    )))
}

#[utoipa::path(
    get,
    path = "/api/buildings/{id}",
    params(("id" = Uuid, Path, description = "Building ID")),
    responses(
        (status = 200, description = "Building", body = ApiResponse<BuildingResponseDto>),
        (status = 404, description = "Building not found")
    ),
    tag = "buildings",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn get_building(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<BuildingService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<BuildingResponseDto>>> {
    let building = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(building), None, None)))
}

#[utoipa::path(
    put,
    path = "/api/buildings/{id}",
    params(("id" = Uuid, Path, description = "Building ID")),
    request_body = UpdateBuildingDto,
    responses(
        (status = 200, description = "Building updated", body = ApiResponse<BuildingResponseDto>),
        (status = 404, description = "Building not found"),
        (status = 409, description = "Building number already exists")
    ),
    tag = "buildings",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn update_building(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<BuildingService>>,
    AppPath(id): AppPath<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateBuildingDto>,
) -> Result<Json<ApiResponse<BuildingResponseDto>>> {
    let building = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(building),
        Some("Building updated".to_string()),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/buildings/{id}",
    params(("id" = Uuid, Path, description = "Building ID")),
    responses(
        (status = 200, description = "Building deleted"),
        (status = 404, description = "Building not found"),
        (status = 409, description = "Building still has flats")
    ),
    tag = "buildings",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn delete_building(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<BuildingService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Building deleted".to_string()),
        None,
    )))
}
