use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Which identity class a session token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Admin,
    Flat,
}

/// Claims carried by the signed session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Admin ID or flat ID, depending on `kind`
    pub sub: Uuid,
    pub kind: SessionKind,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminIdentity {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResidentIdentity {
    pub flat_id: Uuid,
    pub building_id: Uuid,
    pub flat_number: String,
}

/// The caller behind a verified session, resolved against its stored record.
#[derive(Debug, Clone)]
pub enum Principal {
    Admin(AdminIdentity),
    Resident(ResidentIdentity),
}

impl Principal {
    pub fn kind(&self) -> SessionKind {
        match self {
            Principal::Admin(_) => SessionKind::Admin,
            Principal::Resident(_) => SessionKind::Flat,
        }
    }
}
