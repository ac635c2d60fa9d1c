//! Identity guards for handlers.
//!
//! `auth_middleware` resolves the session token into a [`Principal`] and
//! stores it in the request extensions. These extractors then pick the
//! identity class a handler needs. Admins and residents are disjoint: an
//! admin session never passes `RequireResident` and vice versa.

use crate::core::error::AppError;
use crate::features::auth::model::{AdminIdentity, Principal, ResidentIdentity};
use axum::{extract::FromRequestParts, http::request::Parts};

fn principal(parts: &Parts) -> Result<&Principal, AppError> {
    parts
        .extensions
        .get::<Principal>()
        .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
}

/// Guard for admin-scoped endpoints.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(admin): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AdminIdentity);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match principal(parts)? {
            Principal::Admin(admin) => Ok(RequireAdmin(admin.clone())),
            Principal::Resident(_) => Err(AppError::Forbidden("Admin access required".to_string())),
        }
    }
}

/// Guard for resident-scoped endpoints. The flat is always the token's
/// subject, never a caller-supplied ID.
pub struct RequireResident(pub ResidentIdentity);

impl<S> FromRequestParts<S> for RequireResident
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match principal(parts)? {
            Principal::Resident(resident) => Ok(RequireResident(resident.clone())),
            Principal::Admin(_) => Err(AppError::Forbidden(
                "Flat resident access required".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{with_admin_auth, with_resident_auth};
    use axum::{http::StatusCode, routing::get, Router};
    use axum_test::TestServer;

    async fn admin_only(RequireAdmin(admin): RequireAdmin) -> String {
        admin.email
    }

    async fn resident_only(RequireResident(resident): RequireResident) -> String {
        resident.flat_number
    }

    fn router() -> Router {
        Router::new()
            .route("/admin", get(admin_only))
            .route("/resident", get(resident_only))
    }

    #[tokio::test]
    async fn test_missing_principal_is_unauthorized() {
        let server = TestServer::new(router()).unwrap();

        let response = server.get("/admin").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Authentication required");

        server
            .get("/resident")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_principal() {
        let server = TestServer::new(with_admin_auth(router())).unwrap();

        let response = server.get("/admin").await;
        response.assert_status_ok();
        response.assert_text("admin@example.com");

        server
            .get("/resident")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_resident_principal() {
        let server = TestServer::new(with_resident_auth(router())).unwrap();

        let response = server.get("/resident").await;
        response.assert_status_ok();
        response.assert_text("A1");

        server.get("/admin").await.assert_status(StatusCode::FORBIDDEN);
    }
}
