use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::{AppPath, ValidatedJson};
use crate::features::admins::dtos::{AdminResponseDto, CreateAdminDto};
use crate::features::admins::services::AdminService;
use crate::features::auth::guards::RequireAdmin;
use crate::shared::types::{ApiResponse, Meta};

#[utoipa::path(
    post,
    path = "/api/admins",
    request_body = CreateAdminDto,
    responses(
        (status = 201, description = "Admin created", body = ApiResponse<AdminResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already in use")
    ),
    tag = "admins",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn create_admin(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    ValidatedJson(dto): ValidatedJson<CreateAdminDto>,
) -> Result<(StatusCode, Json<ApiResponse<AdminResponseDto>>)> {
    let created = service.create(dto).await?;
    tracing::info!(created_by = %admin.id, admin_id = %created.id, "Admin created another admin");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(created),
            Some("Admin created".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admins",
    responses(
        (status = 200, description = "Admin accounts", body = ApiResponse<Vec<AdminResponseDto>>)
    ),
    tag = "admins",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn list_admins(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<AdminService>>,
) -> Result<Json<ApiResponse<Vec<AdminResponseDto>>>> {
    let admins = service.list().await?;
    let total = admins.len() as i64;
    Ok(Json(ApiResponse::success(Some(admins), None, Some(Meta::total(total)))))
}

#[utoipa::path(
    get,
    path = "/api/admins/{id}",
    params(("id" = Uuid, Path, description = "Admin ID")),
    responses(
        (status = 200, description = "Admin account", body = ApiResponse<AdminResponseDto>),
        (status = 404, description = "Admin not found")
    ),
    tag = "admins",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn get_admin(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<AdminResponseDto>>> {
    let admin = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(admin), None, None)))
}

#[utoipa::path(
    delete,
    path = "/api/admins/{id}",
    params(("id" = Uuid, Path, description = "Admin ID")),
    responses(
        (status = 200, description = "Admin deleted"),
        (status = 400, description = "Cannot delete your own account"),
        (status = 404, description = "Admin not found")
    ),
    tag = "admins",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn delete_admin(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id, admin.id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Admin deleted".to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use crate::features::admins::{routes, AdminService};
    use crate::shared::test_helpers::{
        create_admin_identity, lazy_pool, with_admin_auth, with_resident_auth,
    };
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;
    use std::sync::Arc;

    fn router() -> axum::Router {
        routes::routes(Arc::new(AdminService::new(lazy_pool())))
    }

    #[tokio::test]
    async fn test_admin_cannot_delete_self() {
        let server = TestServer::new(with_admin_auth(router())).unwrap();
        let own_id = create_admin_identity().id;

        let response = server.delete(&format!("/api/admins/{}", own_id)).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["message"], "You cannot delete your own admin account");
    }

    #[tokio::test]
    async fn test_create_admin_rejects_short_password() {
        let server = TestServer::new(with_admin_auth(router())).unwrap();

        let response = server
            .post("/api/admins")
            .json(&json!({
                "username": "second",
                "email": "second@example.com",
                "password": "short"
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_residents_are_forbidden() {
        let server = TestServer::new(with_resident_auth(router())).unwrap();
        server
            .get("/api/admins")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_anonymous_is_unauthorized() {
        let server = TestServer::new(router()).unwrap();
        server
            .get("/api/admins")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
