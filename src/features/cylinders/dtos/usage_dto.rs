use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::cylinders::models::UsageLog;
use crate::shared::validation::money;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUsageLogDto {
    #[serde(alias = "building")]
    pub building_id: Uuid,

    #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
    pub month: i32,

    #[validate(range(min = 1970, max = 9999, message = "Year must be between 1970 and 9999"))]
    pub year: i32,

    #[validate(range(min = 0, message = "Cylinders used must not be negative"))]
    pub cylinders_used: i32,

    #[validate(custom(function = "money"))]
    pub unit_cost: Decimal,
}

/// Replaces period and figures; the building stays the same.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUsageLogDto {
    #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
    pub month: i32,

    #[validate(range(min = 1970, max = 9999, message = "Year must be between 1970 and 9999"))]
    pub year: i32,

    #[validate(range(min = 0, message = "Cylinders used must not be negative"))]
    pub cylinders_used: i32,

    #[validate(custom(function = "money"))]
    pub unit_cost: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsageLogResponseDto {
    pub id: Uuid,
    pub building_id: Uuid,
    pub building_number: String,
    pub month: i32,
    pub year: i32,
    pub cylinders_used: i32,
    pub unit_cost: Decimal,
    /// `cylinders_used * unit_cost`
    pub total_cost: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UsageLog> for UsageLogResponseDto {
    fn from(log: UsageLog) -> Self {
        Self {
            id: log.id,
            building_id: log.building_id,
            building_number: log.building_number,
            month: log.month,
            year: log.year,
            cylinders_used: log.cylinders_used,
            unit_cost: log.unit_cost,
            total_cost: log.total_cost,
            created_at: log.created_at,
            updated_at: log.updated_at,
        }
    }
}
