use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::gas_usages::ledger::Reading;
use crate::features::gas_usages::models::GasUsage;
use crate::shared::period::{PeriodError, PeriodRange, RangeQuery};
use crate::shared::validation::{meter_value, money};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGasUsageDto {
    #[serde(alias = "flat")]
    pub flat_id: Uuid,

    #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
    pub month: i32,

    #[validate(range(min = 1970, max = 9999, message = "Year must be between 1970 and 9999"))]
    pub year: i32,

    /// Cumulative meter value at the end of the month
    #[validate(custom(function = "meter_value"))]
    pub unit_readout: Decimal,

    #[validate(custom(function = "meter_value"))]
    pub unit_cost: Decimal,

    /// Amount paid so far (default: 0); capped at the bill total
    #[serde(default)]
    #[validate(custom(function = "money"))]
    pub bill_paid: Decimal,
}

impl CreateGasUsageDto {
    pub fn reading(&self) -> Reading {
        Reading {
            unit_readout: self.unit_readout,
            unit_cost: self.unit_cost,
            bill_paid: self.bill_paid,
        }
    }
}

/// Full replacement of a reading. The flat stays the same; the period may move.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGasUsageDto {
    #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
    pub month: i32,

    #[validate(range(min = 1970, max = 9999, message = "Year must be between 1970 and 9999"))]
    pub year: i32,

    #[validate(custom(function = "meter_value"))]
    pub unit_readout: Decimal,

    #[validate(custom(function = "meter_value"))]
    pub unit_cost: Decimal,

    #[validate(custom(function = "money"))]
    pub bill_paid: Decimal,
}

impl UpdateGasUsageDto {
    pub fn reading(&self) -> Reading {
        Reading {
            unit_readout: self.unit_readout,
            unit_cost: self.unit_cost,
            bill_paid: self.bill_paid,
        }
    }
}

/// `?starting=YYYY-MM&ending=YYYY-MM&status=true|false`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GasUsageQuery {
    /// First period, inclusive (YYYY-MM)
    pub starting: Option<String>,
    /// Last period, inclusive (YYYY-MM)
    pub ending: Option<String>,
    /// Only settled (`true`) or only open (`false`) bills
    pub status: Option<bool>,
}

impl GasUsageQuery {
    pub fn range(&self) -> Result<PeriodRange, PeriodError> {
        RangeQuery {
            starting: self.starting.clone(),
            ending: self.ending.clone(),
        }
        .range()
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GasUsageResponseDto {
    pub id: Uuid,
    pub flat_id: Uuid,
    pub flat_number: String,
    pub month: i32,
    pub year: i32,
    pub unit_readout: Decimal,
    pub unit_cost: Decimal,
    pub units_used: Decimal,
    pub bill_total: Decimal,
    pub bill_paid: Decimal,
    /// Bill settled
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GasUsage> for GasUsageResponseDto {
    fn from(usage: GasUsage) -> Self {
        Self {
            id: usage.id,
            flat_id: usage.flat_id,
            flat_number: usage.flat_number,
            month: usage.month,
            year: usage.year,
            unit_readout: usage.unit_readout,
            unit_cost: usage.unit_cost,
            units_used: usage.units_used,
            bill_total: usage.bill_total,
            bill_paid: usage.bill_paid,
            status: usage.status,
            created_at: usage.created_at,
            updated_at: usage.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_accepts_numbers_and_defaults_paid() {
        let dto: CreateGasUsageDto = serde_json::from_value(json!({
            "flatId": Uuid::new_v4(),
            "month": 6,
            "year": 2024,
            "unitReadout": 150,
            "unitCost": 12.5
        }))
        .unwrap();

        assert!(dto.validate().is_ok());
        assert_eq!(dto.bill_paid, Decimal::ZERO);
        assert_eq!(dto.reading().unit_cost, "12.5".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_create_rejects_out_of_range_fields() {
        let dto: CreateGasUsageDto = serde_json::from_value(json!({
            "flat": Uuid::new_v4(),
            "month": 13,
            "year": 2024,
            "unitReadout": -1,
            "unitCost": 12.5
        }))
        .unwrap();

        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("month"));
        assert!(fields.contains_key("unit_readout"));
    }

    #[test]
    fn test_query_status_filter() {
        let query: GasUsageQuery =
            serde_json::from_value(json!({ "starting": "2024-01", "ending": "2024-03", "status": false }))
                .unwrap();
        assert_eq!(query.status, Some(false));
        assert_eq!(query.range().unwrap(), PeriodRange { start: 202401, end: 202403 });

        assert!(GasUsageQuery::default().range().is_err());
    }
}
