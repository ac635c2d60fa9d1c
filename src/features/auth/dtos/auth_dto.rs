use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::auth::model::{AdminIdentity, Principal, ResidentIdentity, SessionKind};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AdminSignInDto {
    #[validate(length(min = 1, max = 255, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, max = 128, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlatSignInDto {
    #[serde(alias = "flat")]
    #[validate(length(min = 1, max = 50, message = "Flat number is required"))]
    pub flat_number: String,

    #[validate(length(min = 1, max = 30, message = "Phone number is required"))]
    pub phone: String,
}

/// The caller behind the current session. Exactly one of `admin`/`flat` is set.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponseDto {
    pub kind: SessionKind,
    /// Seconds until the session expires; only set on sign-in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<AdminIdentity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flat: Option<ResidentIdentity>,
}

impl SessionResponseDto {
    pub fn new(principal: Principal, expires_in: Option<i64>) -> Self {
        let kind = principal.kind();
        let (admin, flat) = match principal {
            Principal::Admin(admin) => (Some(admin), None),
            Principal::Resident(resident) => (None, Some(resident)),
        };
        Self {
            kind,
            expires_in,
            admin,
            flat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{create_admin_identity, create_resident_identity};
    use serde_json::json;

    #[test]
    fn test_flat_sign_in_accepts_legacy_key() {
        let dto: FlatSignInDto =
            serde_json::from_value(json!({ "flat": "a1", "phone": "01711223344" })).unwrap();
        assert_eq!(dto.flat_number, "a1");
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_session_response_shape() {
        let admin = serde_json::to_value(SessionResponseDto::new(
            Principal::Admin(create_admin_identity()),
            Some(3600),
        ))
        .unwrap();
        assert_eq!(admin["kind"], "admin");
        assert_eq!(admin["expiresIn"], 3600);
        assert_eq!(admin["admin"]["email"], "admin@example.com");
        assert!(admin.get("flat").is_none());

        let resident = serde_json::to_value(SessionResponseDto::new(
            Principal::Resident(create_resident_identity()),
            None,
        ))
        .unwrap();
        assert_eq!(resident["kind"], "flat");
        assert_eq!(resident["flat"]["flatNumber"], "A1");
        assert!(resident.get("expiresIn").is_none());
    }
}
