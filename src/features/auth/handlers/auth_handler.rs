use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::core::error::Result;
use crate::core::extractor::ValidatedJson;
use crate::features::admins::dtos::CreateAdminDto;
use crate::features::auth::cookie::clear_session_cookie;
use crate::features::auth::dtos::{AdminSignInDto, FlatSignInDto, SessionResponseDto};
use crate::features::auth::guards::{RequireAdmin, RequireResident};
use crate::features::auth::model::Principal;
use crate::features::auth::services::auth_service::Session;
use crate::features::auth::services::AuthService;
use crate::shared::types::ApiResponse;

fn signed_in(
    service: &AuthService,
    jar: CookieJar,
    session: Session,
    message: &str,
) -> (CookieJar, Json<ApiResponse<SessionResponseDto>>) {
    let jar = jar.add(service.cookie(&session.token));
    let body = SessionResponseDto::new(session.principal, Some(session.token.expires_in));
    (
        jar,
        Json(ApiResponse::success(Some(body), Some(message.to_string()), None)),
    )
}

/// Create the first admin account and sign it in
#[utoipa::path(
    post,
    path = "/api/auth/admin-sign-up",
    request_body = CreateAdminDto,
    responses(
        (status = 201, description = "Admin account created", body = ApiResponse<SessionResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "An admin account already exists")
    ),
    tag = "auth"
)]
pub async fn admin_sign_up(
    State(service): State<Arc<AuthService>>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<CreateAdminDto>,
) -> Result<(StatusCode, CookieJar, Json<ApiResponse<SessionResponseDto>>)> {
    let session = service.admin_sign_up(dto).await?;
    let (jar, body) = signed_in(&service, jar, session, "Admin account created");
    Ok((StatusCode::CREATED, jar, body))
}

#[utoipa::path(
    post,
    path = "/api/auth/admin-sign-in",
    request_body = AdminSignInDto,
    responses(
        (status = 200, description = "Signed in; session cookie set", body = ApiResponse<SessionResponseDto>),
        (status = 401, description = "The password is invalid"),
        (status = 404, description = "No admin with this email")
    ),
    tag = "auth"
)]
pub async fn admin_sign_in(
    State(service): State<Arc<AuthService>>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<AdminSignInDto>,
) -> Result<(CookieJar, Json<ApiResponse<SessionResponseDto>>)> {
    let session = service.admin_sign_in(dto).await?;
    Ok(signed_in(&service, jar, session, "Signed in successfully"))
}

#[utoipa::path(
    post,
    path = "/api/auth/flat-sign-in",
    request_body = FlatSignInDto,
    responses(
        (status = 200, description = "Signed in; session cookie set", body = ApiResponse<SessionResponseDto>),
        (status = 404, description = "No flat resident with these credentials")
    ),
    tag = "auth"
)]
pub async fn flat_sign_in(
    State(service): State<Arc<AuthService>>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<FlatSignInDto>,
) -> Result<(CookieJar, Json<ApiResponse<SessionResponseDto>>)> {
    let session = service.flat_sign_in(dto).await?;
    Ok(signed_in(&service, jar, session, "Signed in successfully"))
}

#[utoipa::path(
    post,
    path = "/api/auth/admin-sign-out",
    responses((status = 200, description = "Session cookie cleared")),
    tag = "auth"
)]
pub async fn admin_sign_out(jar: CookieJar) -> (CookieJar, Json<ApiResponse<()>>) {
    sign_out(jar)
}

#[utoipa::path(
    post,
    path = "/api/auth/flat-sign-out",
    responses((status = 200, description = "Session cookie cleared")),
    tag = "auth"
)]
pub async fn flat_sign_out(jar: CookieJar) -> (CookieJar, Json<ApiResponse<()>>) {
    sign_out(jar)
}

fn sign_out(jar: CookieJar) -> (CookieJar, Json<ApiResponse<()>>) {
    (
        jar.add(clear_session_cookie()),
        Json(ApiResponse::success(
            None,
            Some("Signed out successfully".to_string()),
            None,
        )),
    )
}

#[utoipa::path(
    get,
    path = "/api/auth/admin-auth-check",
    responses(
        (status = 200, description = "Current admin", body = ApiResponse<SessionResponseDto>),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "Not an admin session")
    ),
    tag = "auth",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn admin_auth_check(
    RequireAdmin(admin): RequireAdmin,
) -> Json<ApiResponse<SessionResponseDto>> {
    Json(ApiResponse::success(
        Some(SessionResponseDto::new(Principal::Admin(admin), None)),
        None,
        None,
    ))
}

#[utoipa::path(
    get,
    path = "/api/auth/flat-auth-check",
    responses(
        (status = 200, description = "Current flat resident", body = ApiResponse<SessionResponseDto>),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "Not a resident session")
    ),
    tag = "auth",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn flat_auth_check(
    RequireResident(resident): RequireResident,
) -> Json<ApiResponse<SessionResponseDto>> {
    Json(ApiResponse::success(
        Some(SessionResponseDto::new(Principal::Resident(resident), None)),
        None,
        None,
    ))
}

#[cfg(test)]
mod tests {
    use crate::features::admins::AdminService;
    use crate::features::auth::services::TokenService;
    use crate::features::auth::{routes, AuthService};
    use crate::features::flats::FlatService;
    use crate::shared::test_helpers::{lazy_pool, with_admin_auth, with_resident_auth};
    use axum::http::StatusCode;
    use axum::Router;
    use axum_test::TestServer;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    fn service() -> Arc<AuthService> {
        let pool = lazy_pool();
        Arc::new(AuthService::new(
            Arc::new(AdminService::new(pool.clone())),
            Arc::new(FlatService::new(pool)),
            Arc::new(TokenService::from_secret(&[1u8; 32], "test", Duration::from_secs(60))),
            false,
        ))
    }

    fn router() -> Router {
        let service = service();
        routes::public_routes(service.clone()).merge(routes::protected_routes(service))
    }

    #[tokio::test]
    async fn test_sign_out_clears_cookie() {
        let server = TestServer::new(router()).unwrap();

        let response = server.post("/api/auth/admin-sign-out").await;
        response.assert_status_ok();
        let cookie = response.cookie("token");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));

        server
            .post("/api/auth/flat-sign-out")
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn test_sign_in_validation() {
        let server = TestServer::new(router()).unwrap();

        server
            .post("/api/auth/admin-sign-in")
            .json(&json!({ "email": "", "password": "" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .post("/api/auth/flat-sign-in")
            .json(&json!({ "flatNumber": "A1" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_auth_checks_follow_the_principal() {
        let admin = TestServer::new(with_admin_auth(router())).unwrap();
        let response = admin.get("/api/auth/admin-auth-check").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["kind"], "admin");
        admin
            .get("/api/auth/flat-auth-check")
            .await
            .assert_status(StatusCode::FORBIDDEN);

        let resident = TestServer::new(with_resident_auth(router())).unwrap();
        let response = resident.get("/api/auth/flat-auth-check").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["flat"]["flatNumber"], "A1");
    }

    #[tokio::test]
    async fn test_auth_check_without_session() {
        let server = TestServer::new(router()).unwrap();
        server
            .get("/api/auth/admin-auth-check")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
