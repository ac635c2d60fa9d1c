use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::cylinders::models::PurchaseLog;
use crate::shared::validation::{money, not_blank};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchaseLogDto {
    #[serde(alias = "building")]
    pub building_id: Uuid,

    #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
    pub month: i32,

    #[validate(range(min = 1970, max = 9999, message = "Year must be between 1970 and 9999"))]
    pub year: i32,

    #[validate(range(min = 0, message = "Cylinders purchased must not be negative"))]
    pub cylinders_purchased: i32,

    #[validate(
        length(max = 255, message = "Dealer must be at most 255 characters"),
        custom(function = "not_blank", message = "Dealer is required")
    )]
    pub dealer: String,

    #[validate(custom(function = "money"))]
    pub cost: Decimal,

    /// Transport and similar costs (default: 0)
    #[serde(default)]
    #[validate(custom(function = "money"))]
    pub other_cost: Decimal,
}

/// Replaces period and figures; the building stays the same.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePurchaseLogDto {
    #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
    pub month: i32,

    #[validate(range(min = 1970, max = 9999, message = "Year must be between 1970 and 9999"))]
    pub year: i32,

    #[validate(range(min = 0, message = "Cylinders purchased must not be negative"))]
    pub cylinders_purchased: i32,

    #[validate(
        length(max = 255, message = "Dealer must be at most 255 characters"),
        custom(function = "not_blank", message = "Dealer is required")
    )]
    pub dealer: String,

    #[validate(custom(function = "money"))]
    pub cost: Decimal,

    #[serde(default)]
    #[validate(custom(function = "money"))]
    pub other_cost: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseLogResponseDto {
    pub id: Uuid,
    pub building_id: Uuid,
    pub building_number: String,
    pub month: i32,
    pub year: i32,
    pub cylinders_purchased: i32,
    pub dealer: String,
    pub cost: Decimal,
    pub other_cost: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PurchaseLog> for PurchaseLogResponseDto {
    fn from(log: PurchaseLog) -> Self {
        Self {
            id: log.id,
            building_id: log.building_id,
            building_number: log.building_number,
            month: log.month,
            year: log.year,
            cylinders_purchased: log.cylinders_purchased,
            dealer: log.dealer,
            cost: log.cost,
            other_cost: log.other_cost,
            created_at: log.created_at,
            updated_at: log.updated_at,
        }
    }
}
