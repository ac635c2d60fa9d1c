use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use std::collections::BTreeMap;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::buildings::dtos::BuildingResponseDto;

// ============================================================================
// Monthly summaries
// ============================================================================

/// The building's cylinder purchase for the month, zero when none was logged
#[derive(Debug, Default, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CylinderPurchaseSummary {
    pub cylinders_purchased: i32,
    pub cost: Decimal,
    pub other_cost: Decimal,
}

/// The building's cylinder usage for the month, zero when none was logged
#[derive(Debug, Default, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CylinderUsageSummary {
    pub cylinders_used: i32,
    pub unit_cost: Decimal,
    pub total_cost: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBuildingSummaryDto {
    pub building_id: Uuid,
    pub month: i32,
    pub year: i32,
    pub total_units_used: Decimal,
    pub total_bill: Decimal,
    pub paid_bill: Decimal,
    /// `totalBill - paidBill`
    pub remaining_bill: Decimal,
    pub total_contribution: Decimal,
    pub total_service_charge: Decimal,
    pub cylinder_purchase: CylinderPurchaseSummary,
    pub cylinder_usage: CylinderUsageSummary,
}

/// The flat's gas record for the month; unpaid zeroes when missing
#[derive(Debug, Default, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GasUsageSummary {
    pub unit_readout: Decimal,
    pub unit_cost: Decimal,
    pub units_used: Decimal,
    pub bill_total: Decimal,
    pub bill_paid: Decimal,
    pub status: bool,
}

#[derive(Debug, Default, Serialize, FromRow, ToSchema)]
pub struct AmountSummary {
    pub amount: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyFlatSummaryDto {
    pub flat_id: Uuid,
    pub month: i32,
    pub year: i32,
    /// Unpaid gas bill over every period of the flat
    pub total_remaining_bill: Decimal,
    pub gas_usage: GasUsageSummary,
    pub contribution: AmountSummary,
    pub service_charge: AmountSummary,
}

// ============================================================================
// Yearly charts
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MonthValue {
    pub month: i32,
    pub value: Decimal,
}

/// One point per month of the year, January first. Months without data are
/// zero; values reported twice for a month are added.
pub fn fill_months<I>(points: I) -> Vec<MonthValue>
where
    I: IntoIterator<Item = (i32, Decimal)>,
{
    let mut by_month: BTreeMap<i32, Decimal> = (1..=12).map(|m| (m, Decimal::ZERO)).collect();
    for (month, value) in points {
        if let Some(total) = by_month.get_mut(&month) {
            *total += value;
        }
    }

    by_month
        .into_iter()
        .map(|(month, value)| MonthValue { month, value })
        .collect()
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct YearlyBuildingChartDto {
    pub year: i32,
    pub building: BuildingResponseDto,
    pub cylinders_purchased_chart: Vec<MonthValue>,
    pub cylinders_used_chart: Vec<MonthValue>,
    pub unit_cost_chart: Vec<MonthValue>,
    /// Sum of the flats' gas bill totals
    pub total_gas_bill_chart: Vec<MonthValue>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct YearlyFlatChartDto {
    pub year: i32,
    pub flat_id: Uuid,
    pub units_used_chart: Vec<MonthValue>,
    pub bill_total_chart: Vec<MonthValue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    #[test]
    fn test_fill_months_zero_fills_the_year() {
        let points = fill_months(vec![(3, dec("12.5")), (11, dec("4"))]);

        assert_eq!(points.len(), 12);
        assert_eq!(points.iter().map(|p| p.month).collect::<Vec<_>>(), (1..=12).collect::<Vec<_>>());
        assert_eq!(points[2].value, dec("12.5"));
        assert_eq!(points[10].value, dec("4"));
        assert!(points
            .iter()
            .filter(|p| p.month != 3 && p.month != 11)
            .all(|p| p.value.is_zero()));
    }

    #[test]
    fn test_fill_months_adds_repeats_and_drops_unknown_months() {
        let points = fill_months(vec![(1, dec("1")), (1, dec("2")), (0, dec("9")), (13, dec("9"))]);
        assert_eq!(points[0].value, dec("3"));
        assert_eq!(points.iter().map(|p| p.value).sum::<Decimal>(), dec("3"));
    }

    #[test]
    fn test_missing_gas_record_reads_as_unpaid() {
        let summary = GasUsageSummary::default();
        assert!(!summary.status);
        assert!(summary.bill_total.is_zero());

        let json = serde_json::to_value(MonthlyFlatSummaryDto {
            flat_id: Uuid::nil(),
            month: 5,
            year: 2025,
            total_remaining_bill: Decimal::ZERO,
            gas_usage: summary,
            contribution: AmountSummary::default(),
            service_charge: AmountSummary::default(),
        })
        .unwrap();
        assert_eq!(json["gasUsage"]["status"], false);
        assert!(json.get("serviceCharge").is_some());
        assert!(json.get("totalRemainingBill").is_some());
    }
}
