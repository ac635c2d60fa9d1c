use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::shared::constants::MONEY_SCALE;
use crate::shared::validation::fits_scale;

/// Cylinder usage row joined with its building number
#[derive(Debug, Clone, FromRow)]
pub struct UsageLog {
    pub id: Uuid,
    pub building_id: Uuid,
    pub building_number: String,
    pub month: i32,
    pub year: i32,
    pub cylinders_used: i32,
    pub unit_cost: Decimal,
    pub total_cost: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `cylinders_used * unit_cost`
pub fn total_cost(cylinders_used: i32, unit_cost: Decimal) -> Result<Decimal> {
    if !fits_scale(&unit_cost, MONEY_SCALE) {
        return Err(AppError::Validation(
            "Unit cost must have at most 2 decimal places".to_string(),
        ));
    }
    Decimal::from(cylinders_used)
        .checked_mul(unit_cost)
        .ok_or_else(|| AppError::Validation("Total cost is too large".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_cost() {
        let unit_cost: Decimal = "1450.50".parse().unwrap();
        assert_eq!(total_cost(4, unit_cost).unwrap(), "5802.00".parse::<Decimal>().unwrap());
        assert_eq!(total_cost(0, unit_cost).unwrap(), Decimal::ZERO);
        assert!(total_cost(i32::MAX, Decimal::MAX).is_err());
    }

    #[test]
    fn test_total_cost_rejects_unit_cost_finer_than_cents() {
        let err = total_cost(3, "10.005".parse().unwrap()).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.contains("2 decimal places")));
        assert!(total_cost(3, "10.050".parse().unwrap()).is_ok());
    }
}
