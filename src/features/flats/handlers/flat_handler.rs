use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::{AppPath, ValidatedJson};
use crate::features::auth::guards::RequireAdmin;
use crate::features::flats::dtos::{CreateFlatDto, FlatResponseDto, UpdateFlatDto};
use crate::features::flats::services::FlatService;
use crate::shared::types::{ApiResponse, Meta};

#[utoipa::path(
    post,
    path = "/api/flats",
    request_body = CreateFlatDto,
    responses(
        (status = 201, description = "Flat created", body = ApiResponse<FlatResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Building not found"),
        (status = 409, description = "Flat number already exists")
    ),
    tag = "flats",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn create_flat(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<FlatService>>,
    ValidatedJson(dto): ValidatedJson<CreateFlatDto>,
) -> Result<(StatusCode, Json<ApiResponse<FlatResponseDto>>)> {
    let flat = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(flat),
            Some("Flat created".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/flats",
    responses(
        (status = 200, description = "All flats", body = ApiResponse<Vec<FlatResponseDto>>)
    ),
    tag = "flats",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn list_flats(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<FlatService>>,
) -> Result<Json<ApiResponse<Vec<FlatResponseDto>>>> {
    let flats = service.list().await?;
    let total = flats.len() as i64;
    Ok(Json(ApiResponse::success(Some(flats), None, Some(Meta::total(total)))))
}

#[utoipa::path(
    get,
    path = "/api/flats/building/{building_id}",
    params(("building_id" = Uuid, Path, description = "Building ID")),
    responses(
        (status = 200, description = "Flats of the building", body = ApiResponse<Vec<FlatResponseDto>>),
        (status = 404, description = "Building not found")
    ),
    tag = "flats",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn list_flats_by_building(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<FlatService>>,
    AppPath(building_id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<Vec<FlatResponseDto>>>> {
    let flats = service.list_by_building(building_id).await?;
    let total = flats.len() as i64;
    Ok(Json(ApiResponse::success(Some(flats), None, Some(Meta::total(total)))))
}

#[utoipa::path(
    get,
    path = "/api/flats/{id}",
    params(("id" = Uuid, Path, description = "Flat ID")),
    responses(
        (status = 200, description = "Flat", body = ApiResponse<FlatResponseDto>),
        (status = 404, description = "Flat not found")
    ),
    tag = "flats",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn get_flat(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<FlatService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<FlatResponseDto>>> {
    let flat = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(flat), None, None)))
}

#[utoipa::path(
    put,
    path = "/api/flats/{id}",
    params(("id" = Uuid, Path, description = "Flat ID")),
    request_body = UpdateFlatDto,
    responses(
        (status = 200, description = "Flat updated", body = ApiResponse<FlatResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Flat not found")
    ),
    tag = "flats",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn update_flat(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<FlatService>>,
    AppPath(id): AppPath<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateFlatDto>,
) -> Result<Json<ApiResponse<FlatResponseDto>>> {
    let flat = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(flat),
        Some("Flat updated".to_string()),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/flats/{id}",
    params(("id" = Uuid, Path, description = "Flat ID")),
    responses(
        (status = 200, description = "Flat deleted"),
        (status = 404, description = "Flat not found")
    ),
    tag = "flats",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn delete_flat(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<FlatService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Flat deleted".to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use crate::features::flats::{routes, FlatService};
    use crate::shared::test_helpers::{lazy_pool, with_admin_auth, with_resident_auth};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;
    use std::sync::Arc;

    fn server(admin: bool) -> TestServer {
        let router = routes::routes(Arc::new(FlatService::new(lazy_pool())));
        let router = if admin {
            with_admin_auth(router)
        } else {
            with_resident_auth(router)
        };
        TestServer::new(router).unwrap()
    }

    #[tokio::test]
    async fn test_create_flat_validation_error() {
        let response = server(true)
            .post("/api/flats")
            .json(&json!({
                "buildingId": "7f1a3c44-5d2e-4b8f-9a10-2b3c4d5e6f70",
                "flatNumber": "",
                "ownerPhone": "01711223344"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
        assert!(body["errors"].is_array());
    }

    #[tokio::test]
    async fn test_missing_required_field_is_bad_request() {
        let response = server(true)
            .post("/api/flats")
            .json(&json!({ "flatNumber": "A1" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_id_is_bad_request() {
        server(true)
            .get("/api/flats/not-a-uuid")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_residents_cannot_manage_flats() {
        server(false)
            .get("/api/flats")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }
}
