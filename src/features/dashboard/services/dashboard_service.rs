use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::database::read_error;
use crate::core::error::{AppError, Result};
use crate::features::buildings::BuildingService;
use crate::features::charges::ChargeKind;
use crate::features::dashboard::dtos::*;
use crate::features::flats::FlatService;
use crate::shared::period::Period;

/// Read-only aggregates over a building or a flat
pub struct DashboardService {
    pool: PgPool,
    buildings: Arc<BuildingService>,
    flats: Arc<FlatService>,
}

impl DashboardService {
    pub fn new(pool: PgPool, buildings: Arc<BuildingService>, flats: Arc<FlatService>) -> Self {
        Self {
            pool,
            buildings,
            flats,
        }
    }

    /// The building must exist and have at least one flat.
    async fn ensure_building_with_flats(&self, building_id: Uuid) -> Result<()> {
        let flat_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM flats WHERE building_id = $1",
        )
        .bind(building_id)
        .fetch_one(&self.pool)
        .await
        .map_err(read_error("count building flats"))?;

        if flat_count == 0 {
            return Err(AppError::NotFound(
                "No flats found under this building".to_string(),
            ));
        }
        Ok(())
    }

    async fn ensure_flat(&self, flat_id: Uuid) -> Result<()> {
        if self.flats.find_by_id(flat_id).await?.is_none() {
            return Err(AppError::NotFound(
                "Couldn't find any flat with this ID".to_string(),
            ));
        }
        Ok(())
    }

    // ========================================================================
    // Monthly summaries
    // ========================================================================

    pub async fn monthly_building_summary(
        &self,
        building_id: Uuid,
        period: Period,
    ) -> Result<MonthlyBuildingSummaryDto> {
        self.buildings.get_by_id(building_id).await?;
        self.ensure_building_with_flats(building_id).await?;

        let (total_units_used, total_bill, paid_bill) =
            sqlx::query_as::<_, (Decimal, Decimal, Decimal)>(
                r#"
                SELECT
                    COALESCE(SUM(g.units_used), 0),
                    COALESCE(SUM(g.bill_total), 0),
                    COALESCE(SUM(g.bill_paid), 0)
                FROM gas_usages g
                JOIN flats f ON f.id = g.flat_id
                WHERE f.building_id = $1 AND g.month = $2 AND g.year = $3
                "#,
            )
            .bind(building_id)
            .bind(period.month)
            .bind(period.year)
            .fetch_one(&self.pool)
            .await
            .map_err(read_error("sum building gas usage"))?;

        let total_contribution = self
            .building_charge_total(ChargeKind::Contribution, building_id, period)
            .await?;
        let total_service_charge = self
            .building_charge_total(ChargeKind::ServiceCharge, building_id, period)
            .await?;

        let cylinder_purchase = sqlx::query_as::<_, CylinderPurchaseSummary>(
            r#"
            SELECT cylinders_purchased, cost, other_cost
            FROM cylinder_purchase_logs
            WHERE building_id = $1 AND month = $2 AND year = $3
            "#,
        )
        .bind(building_id)
        .bind(period.month)
        .bind(period.year)
        .fetch_optional(&self.pool)
        .await
        .map_err(read_error("fetch cylinder purchase summary"))?
        .unwrap_or_default();

        let cylinder_usage = sqlx::query_as::<_, CylinderUsageSummary>(
            r#"
            SELECT cylinders_used, unit_cost, total_cost
            FROM cylinder_usage_logs
            WHERE building_id = $1 AND month = $2 AND year = $3
            "#,
        )
        .bind(building_id)
        .bind(period.month)
        .bind(period.year)
        .fetch_optional(&self.pool)
        .await
        .map_err(read_error("fetch cylinder usage summary"))?
        .unwrap_or_default();

        Ok(MonthlyBuildingSummaryDto {
            building_id,
            month: period.month,
            year: period.year,
            total_units_used,
            total_bill,
            paid_bill,
            remaining_bill: total_bill - paid_bill,
            total_contribution,
            total_service_charge,
            cylinder_purchase,
            cylinder_usage,
        })
    }

    async fn building_charge_total(
        &self,
        kind: ChargeKind,
        building_id: Uuid,
        period: Period,
    ) -> Result<Decimal> {
        sqlx::query_scalar::<_, Decimal>(&format!(
            r#"
            SELECT COALESCE(SUM(c.amount), 0)
            FROM {} c
            JOIN flats f ON f.id = c.flat_id
            WHERE f.building_id = $1 AND c.month = $2 AND c.year = $3
            "#,
            kind.table()
        ))
        .bind(building_id)
        .bind(period.month)
        .bind(period.year)
        .fetch_one(&self.pool)
        .await
        .map_err(read_error("sum building charges"))
    }

    pub async fn monthly_flat_summary(
        &self,
        flat_id: Uuid,
        period: Period,
    ) -> Result<MonthlyFlatSummaryDto> {
        self.ensure_flat(flat_id).await?;

        let total_remaining_bill = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(bill_total - bill_paid), 0) FROM gas_usages WHERE flat_id = $1",
        )
        .bind(flat_id)
        .fetch_one(&self.pool)
        .await
        .map_err(read_error("sum flat remaining gas bill"))?;

        let gas_usage = sqlx::query_as::<_, GasUsageSummary>(
            r#"
            SELECT unit_readout, unit_cost, units_used, bill_total, bill_paid, status
            FROM gas_usages
            WHERE flat_id = $1 AND month = $2 AND year = $3
            "#,
        )
        .bind(flat_id)
        .bind(period.month)
        .bind(period.year)
        .fetch_optional(&self.pool)
        .await
        .map_err(read_error("fetch flat gas usage summary"))?
        .unwrap_or_default();

        let contribution = self
            .flat_charge(ChargeKind::Contribution, flat_id, period)
            .await?;
        let service_charge = self
            .flat_charge(ChargeKind::ServiceCharge, flat_id, period)
            .await?;

        Ok(MonthlyFlatSummaryDto {
            flat_id,
            month: period.month,
            year: period.year,
            total_remaining_bill,
            gas_usage,
            contribution,
            service_charge,
        })
    }

    async fn flat_charge(
        &self,
        kind: ChargeKind,
        flat_id: Uuid,
        period: Period,
    ) -> Result<AmountSummary> {
        let charge = sqlx::query_as::<_, AmountSummary>(&format!(
            "SELECT amount FROM {} WHERE flat_id = $1 AND month = $2 AND year = $3",
            kind.table()
        ))
        .bind(flat_id)
        .bind(period.month)
        .bind(period.year)
        .fetch_optional(&self.pool)
        .await
        .map_err(read_error("fetch flat charge"))?;

        Ok(charge.unwrap_or_default())
    }

    // ========================================================================
    // Yearly charts
    // ========================================================================

    pub async fn yearly_building_chart(
        &self,
        building_id: Uuid,
        year: i32,
    ) -> Result<YearlyBuildingChartDto> {
        let building = self.buildings.get_by_id(building_id).await?;
        self.ensure_building_with_flats(building_id).await?;

        let purchases = sqlx::query_as::<_, (i32, Decimal)>(
            r#"
            SELECT month, cylinders_purchased::numeric
            FROM cylinder_purchase_logs
            WHERE building_id = $1 AND year = $2
            "#,
        )
        .bind(building_id)
        .bind(year)
        .fetch_all(&self.pool)
        .await
        .map_err(read_error("load yearly cylinder purchases"))?;

        let usages = sqlx::query_as::<_, (i32, Decimal, Decimal)>(
            r#"
            SELECT month, cylinders_used::numeric, unit_cost
            FROM cylinder_usage_logs
            WHERE building_id = $1 AND year = $2
            "#,
        )
        .bind(building_id)
        .bind(year)
        .fetch_all(&self.pool)
        .await
        .map_err(read_error("load yearly cylinder usage"))?;

        let gas_bills = sqlx::query_as::<_, (i32, Decimal)>(
            r#"
            SELECT g.month, SUM(g.bill_total)
            FROM gas_usages g
            JOIN flats f ON f.id = g.flat_id
            WHERE f.building_id = $1 AND g.year = $2
            GROUP BY g.month
            "#,
        )
        .bind(building_id)
        .bind(year)
        .fetch_all(&self.pool)
        .await
        .map_err(read_error("load yearly building gas bills"))?;

        Ok(YearlyBuildingChartDto {
            year,
            building,
            cylinders_purchased_chart: fill_months(purchases),
            cylinders_used_chart: fill_months(usages.iter().map(|(m, used, _)| (*m, *used))),
            unit_cost_chart: fill_months(usages.iter().map(|(m, _, cost)| (*m, *cost))),
            total_gas_bill_chart: fill_months(gas_bills),
        })
    }

    pub async fn yearly_flat_chart(&self, flat_id: Uuid, year: i32) -> Result<YearlyFlatChartDto> {
        self.ensure_flat(flat_id).await?;

        let months = sqlx::query_as::<_, (i32, Decimal, Decimal)>(
            r#"
            SELECT month, SUM(units_used), SUM(bill_total)
            FROM gas_usages
            WHERE flat_id = $1 AND year = $2
            GROUP BY month
            "#,
        )
        .bind(flat_id)
        .bind(year)
        .fetch_all(&self.pool)
        .await
        .map_err(read_error("load yearly flat gas usage"))?;

        Ok(YearlyFlatChartDto {
            year,
            flat_id,
            units_used_chart: fill_months(months.iter().map(|(m, used, _)| (*m, *used))),
            bill_total_chart: fill_months(months.iter().map(|(m, _, total)| (*m, *total))),
        })
    }
}
