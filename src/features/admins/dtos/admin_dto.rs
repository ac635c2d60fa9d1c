use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::admins::models::Admin;
use crate::shared::validation::not_blank;

/// Request DTO for creating an admin (also used by the bootstrap sign-up)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAdminDto {
    #[validate(
        length(min = 1, max = 100, message = "Username must be 1-100 characters"),
        custom(function = "not_blank", message = "Username is required")
    )]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminResponseDto {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Admin> for AdminResponseDto {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id,
            username: admin.username,
            email: admin.email,
            created_at: admin.created_at,
            updated_at: admin.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_response_carries_timestamps_but_not_the_hash() {
        let created_at = Utc::now() - Duration::days(2);
        let admin = Admin {
            id: Uuid::new_v4(),
            username: "manager".to_string(),
            email: "manager@example.com".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            created_at,
            updated_at: Utc::now(),
        };
        let updated_at = admin.updated_at;

        let json = serde_json::to_value(AdminResponseDto::from(admin)).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["createdAt"], serde_json::to_value(created_at).unwrap());
        assert_eq!(json["updatedAt"], serde_json::to_value(updated_at).unwrap());
    }
}
