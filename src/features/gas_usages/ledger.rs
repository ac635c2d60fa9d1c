//! Gas bill arithmetic for one flat and one period.
//!
//! Meter readouts are cumulative, so the units a flat used in a month are the
//! difference to the previous month's readout (0 before the first record).
//! Every create, update and bulk row goes through [`compute`].

use rust_decimal::Decimal;
use thiserror::Error;

use crate::core::error::AppError;
use crate::shared::constants::{METER_SCALE, MONEY_SCALE};
use crate::shared::validation::fits_scale;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("{0} must not be negative")]
    Negative(&'static str),

    #[error("{field} must have at most {scale} decimal places")]
    TooPrecise { field: &'static str, scale: u32 },

    #[error("Unit readout can't be lower than previous month's readout")]
    ReadoutBelowPrevious { readout: Decimal, previous: Decimal },

    #[error("Bill total is too large")]
    Overflow,
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// What an admin records for a period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    pub unit_readout: Decimal,
    pub unit_cost: Decimal,
    pub bill_paid: Decimal,
}

/// A reading with its derived billing fields, as stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerEntry {
    pub unit_readout: Decimal,
    pub unit_cost: Decimal,
    pub units_used: Decimal,
    pub bill_total: Decimal,
    pub bill_paid: Decimal,
    pub status: bool,
}

fn ensure_non_negative(value: Decimal, field: &'static str) -> Result<(), LedgerError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(LedgerError::Negative(field));
    }
    Ok(())
}

// Inputs must fit their columns exactly so nothing derived here is rounded on insert
fn ensure_scale(value: Decimal, field: &'static str, scale: u32) -> Result<(), LedgerError> {
    if !fits_scale(&value, scale) {
        return Err(LedgerError::TooPrecise { field, scale });
    }
    Ok(())
}

/// Derive units used, the bill total (rounded up to a whole amount), the paid
/// amount capped at the total, and whether the bill is settled.
pub fn compute(reading: Reading, previous_readout: Option<Decimal>) -> Result<LedgerEntry, LedgerError> {
    ensure_non_negative(reading.unit_readout, "Unit readout")?;
    ensure_non_negative(reading.unit_cost, "Unit cost")?;
    ensure_non_negative(reading.bill_paid, "Bill paid")?;
    ensure_scale(reading.unit_readout, "Unit readout", METER_SCALE)?;
    ensure_scale(reading.unit_cost, "Unit cost", METER_SCALE)?;
    ensure_scale(reading.bill_paid, "Bill paid", MONEY_SCALE)?;

    let previous = previous_readout.unwrap_or(Decimal::ZERO);
    if reading.unit_readout < previous {
        return Err(LedgerError::ReadoutBelowPrevious {
            readout: reading.unit_readout,
            previous,
        });
    }

    let units_used = reading
        .unit_readout
        .checked_sub(previous)
        .ok_or(LedgerError::Overflow)?;
    let bill_total = units_used
        .checked_mul(reading.unit_cost)
        .ok_or(LedgerError::Overflow)?
        .ceil();
    let bill_paid = reading.bill_paid.min(bill_total);

    Ok(LedgerEntry {
        unit_readout: reading.unit_readout,
        unit_cost: reading.unit_cost,
        units_used,
        bill_total,
        bill_paid,
        status: bill_paid >= bill_total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn reading(readout: &str, cost: &str, paid: &str) -> Reading {
        Reading {
            unit_readout: dec(readout),
            unit_cost: dec(cost),
            bill_paid: dec(paid),
        }
    }

    #[test]
    fn test_units_and_total_from_previous_readout() {
        let entry = compute(reading("150", "12.5", "0"), Some(dec("100"))).unwrap();
        assert_eq!(entry.units_used, dec("50"));
        assert_eq!(entry.bill_total, dec("625"));
        assert_eq!(entry.bill_paid, Decimal::ZERO);
        assert!(!entry.status);
    }

    #[test]
    fn test_overpayment_is_capped() {
        let entry = compute(reading("150", "12.5", "700"), Some(dec("100"))).unwrap();
        assert_eq!(entry.bill_paid, dec("625"));
        assert!(entry.status);
    }

    #[test]
    fn test_partial_payment_leaves_bill_open() {
        let entry = compute(reading("150", "12.5", "600"), Some(dec("100"))).unwrap();
        assert_eq!(entry.bill_paid, dec("600"));
        assert!(!entry.status);
    }

    #[test]
    fn test_first_record_uses_zero_previous() {
        let entry = compute(reading("40", "10", "0"), None).unwrap();
        assert_eq!(entry.units_used, dec("40"));
        assert_eq!(entry.bill_total, dec("400"));
    }

    #[test]
    fn test_fractional_bill_rounds_up() {
        let entry = compute(reading("10.3", "3", "0"), None).unwrap();
        assert_eq!(entry.bill_total, dec("31"));

        let entry = compute(reading("10", "2.01", "0"), None).unwrap();
        assert_eq!(entry.bill_total, dec("21"));
    }

    #[test]
    fn test_zero_usage_is_settled() {
        let entry = compute(reading("100", "12.5", "0"), Some(dec("100"))).unwrap();
        assert_eq!(entry.units_used, Decimal::ZERO);
        assert_eq!(entry.bill_total, Decimal::ZERO);
        assert!(entry.status);
    }

    #[test]
    fn test_lower_readout_is_rejected() {
        let err = compute(reading("90", "12.5", "0"), Some(dec("100"))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unit readout can't be lower than previous month's readout"
        );
        assert!(matches!(AppError::from(err), AppError::Validation(_)));
    }

    #[test]
    fn test_negative_inputs_are_rejected() {
        assert_eq!(
            compute(reading("10", "-1", "0"), None),
            Err(LedgerError::Negative("Unit cost"))
        );
        assert_eq!(
            compute(reading("10", "1", "-5"), None),
            Err(LedgerError::Negative("Bill paid"))
        );
    }

    #[test]
    fn test_inputs_finer_than_their_columns_are_rejected() {
        assert_eq!(
            compute(reading("50", "12.5", "624.995"), None),
            Err(LedgerError::TooPrecise {
                field: "Bill paid",
                scale: 2
            })
        );
        assert_eq!(
            compute(reading("60.0004", "1", "0"), Some(dec("50"))),
            Err(LedgerError::TooPrecise {
                field: "Unit readout",
                scale: 3
            })
        );
        assert_eq!(
            compute(reading("60", "1.0005", "0"), Some(dec("50"))).unwrap_err().to_string(),
            "Unit cost must have at most 3 decimal places"
        );
    }

    #[test]
    fn test_stored_scale_entries_stay_consistent() {
        let entry = compute(reading("50", "12.5", "624.99"), None).unwrap();
        assert_eq!(entry.bill_total, dec("625"));
        assert_eq!(entry.bill_paid, dec("624.99"));
        assert!(!entry.status);

        let entry = compute(reading("60.000", "1.000", "0"), Some(dec("50"))).unwrap();
        assert_eq!(entry.units_used, dec("10"));
        assert_eq!(entry.bill_total, dec("10"));
        assert!(fits_scale(&entry.units_used, METER_SCALE));
        assert!(fits_scale(&entry.bill_total, MONEY_SCALE));
    }

    #[test]
    fn test_overflow_is_an_error() {
        let entry = compute(
            Reading {
                unit_readout: Decimal::MAX,
                unit_cost: Decimal::MAX,
                bill_paid: Decimal::ZERO,
            },
            None,
        );
        assert_eq!(entry, Err(LedgerError::Overflow));
    }
}
