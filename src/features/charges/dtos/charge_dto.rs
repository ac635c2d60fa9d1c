use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::charges::models::Charge;
use crate::shared::validation::money;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateChargeDto {
    #[serde(alias = "flat")]
    pub flat_id: Uuid,

    #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
    pub month: i32,

    #[validate(range(min = 1970, max = 9999, message = "Year must be between 1970 and 9999"))]
    pub year: i32,

    /// Default: 0
    #[serde(default)]
    #[validate(custom(function = "money"))]
    pub amount: Decimal,
}

/// Replaces period and amount; the flat stays the same.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChargeDto {
    #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
    pub month: i32,

    #[validate(range(min = 1970, max = 9999, message = "Year must be between 1970 and 9999"))]
    pub year: i32,

    #[validate(custom(function = "money"))]
    pub amount: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChargeResponseDto {
    pub id: Uuid,
    pub flat_id: Uuid,
    pub flat_number: String,
    pub month: i32,
    pub year: i32,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Charge> for ChargeResponseDto {
    fn from(charge: Charge) -> Self {
        Self {
            id: charge.id,
            flat_id: charge.flat_id,
            flat_number: charge.flat_number,
            month: charge.month,
            year: charge.year,
            amount: charge.amount,
            created_at: charge.created_at,
            updated_at: charge.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, Faker};
    use serde_json::json;

    #[test]
    fn test_amount_defaults_to_zero() {
        let dto: CreateChargeDto = serde_json::from_value(json!({
            "flatId": Faker.fake::<Uuid>(),
            "month": (1..=12).fake::<i32>(),
            "year": (1970..=9999).fake::<i32>()
        }))
        .unwrap();
        assert!(dto.validate().is_ok());
        assert_eq!(dto.amount, Decimal::ZERO);
    }

    #[test]
    fn test_out_of_range_month_is_rejected() {
        let dto: UpdateChargeDto = serde_json::from_value(json!({
            "month": (13..100).fake::<i32>(),
            "year": 2024,
            "amount": 250
        }))
        .unwrap();
        assert!(dto.validate().is_err());
    }
}
