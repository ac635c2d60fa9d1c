use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::{map_write_error, read_error, WriteErrors};
use crate::core::error::{AppError, Result};
use crate::features::gas_usages::dtos::{
    CreateGasUsageDto, GasUsageResponseDto, UpdateGasUsageDto,
};
use crate::features::gas_usages::ledger::{self, LedgerEntry};
use crate::features::gas_usages::models::GasUsage;
use crate::shared::batch::{run_batch, BatchReport};
use crate::shared::period::{Period, PeriodRange};

const GAS_USAGE_WRITE_ERRORS: WriteErrors = WriteErrors {
    conflict: "A gas usage record already exists for this flat and period",
    reference: "Couldn't find any flat with this ID",
};

const GAS_USAGE_FIELDS: &str = r#"
    g.id, g.flat_id, f.flat_number, g.month, g.year,
    g.unit_readout, g.unit_cost, g.units_used, g.bill_total, g.bill_paid,
    g.status, g.created_at, g.updated_at
"#;

fn not_found() -> AppError {
    AppError::NotFound("Couldn't find any gas usage record with this ID".to_string())
}

/// Builds `WITH written AS (<stmt> RETURNING *) SELECT ... FROM written`
fn returning_gas_usage(statement: &str) -> String {
    format!(
        "WITH written AS ({} RETURNING *) SELECT {} FROM written g JOIN flats f ON f.id = g.flat_id",
        statement, GAS_USAGE_FIELDS
    )
}

pub struct GasUsageService {
    pool: PgPool,
}

impl GasUsageService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, dto: CreateGasUsageDto) -> Result<GasUsageResponseDto> {
        let period = Period::new(dto.month, dto.year)?;
        let previous = self
            .previous_readout(dto.flat_id, period, None)
            .await?;
        let entry = ledger::compute(dto.reading(), previous)?;

        let sql = returning_gas_usage(
            r#"
            INSERT INTO gas_usages (flat_id, month, year, unit_readout, unit_cost,
                                    units_used, bill_total, bill_paid, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        );

        let usage = bind_entry(
            sqlx::query_as::<_, GasUsage>(&sql)
                .bind(dto.flat_id)
                .bind(period.month)
                .bind(period.year),
            &entry,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, GAS_USAGE_WRITE_ERRORS, false))?;

        tracing::info!(
            gas_usage_id = %usage.id,
            flat_id = %usage.flat_id,
            period = %period,
            "Gas usage recorded"
        );
        Ok(usage.into())
    }

    /// Rows run in order, so a row may build on the readout of an earlier one.
    pub async fn create_many(&self, rows: Vec<serde_json::Value>) -> Result<BatchReport> {
        run_batch(rows, |dto: CreateGasUsageDto| async move {
            self.create(dto).await.map(|_| ())
        })
        .await
    }

    pub async fn list_for_building(
        &self,
        building_id: Uuid,
        range: PeriodRange,
        status: Option<bool>,
    ) -> Result<Vec<GasUsageResponseDto>> {
        self.list_where("f.building_id = $1", building_id, range, status)
            .await
    }

    pub async fn list_for_flat(
        &self,
        flat_id: Uuid,
        range: PeriodRange,
        status: Option<bool>,
    ) -> Result<Vec<GasUsageResponseDto>> {
        self.list_where("g.flat_id = $1", flat_id, range, status)
            .await
    }

    async fn list_where(
        &self,
        owner_filter: &str,
        owner_id: Uuid,
        range: PeriodRange,
        status: Option<bool>,
    ) -> Result<Vec<GasUsageResponseDto>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM gas_usages g
            JOIN flats f ON f.id = g.flat_id
            WHERE {}
              AND g.year * 100 + g.month BETWEEN $2 AND $3
              AND ($4::boolean IS NULL OR g.status = $4)
            ORDER BY g.year DESC, g.month DESC, f.flat_number
            "#,
            GAS_USAGE_FIELDS, owner_filter
        );

        let usages = sqlx::query_as::<_, GasUsage>(&sql)
            .bind(owner_id)
            .bind(range.start)
            .bind(range.end)
            .bind(status)
            .fetch_all(&self.pool)
            .await
            .map_err(read_error("list gas usages"))?;

        Ok(usages.into_iter().map(GasUsageResponseDto::from).collect())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<GasUsage>> {
        sqlx::query_as::<_, GasUsage>(&format!(
            "SELECT {} FROM gas_usages g JOIN flats f ON f.id = g.flat_id WHERE g.id = $1",
            GAS_USAGE_FIELDS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(read_error("fetch gas usage"))
    }

    /// Recompute the derived fields against the month before the target period.
    /// A rejected reading leaves the stored record untouched.
    pub async fn update(&self, id: Uuid, dto: UpdateGasUsageDto) -> Result<GasUsageResponseDto> {
        let existing = self.find_by_id(id).await?.ok_or_else(not_found)?;
        let period = Period::new(dto.month, dto.year)?;
        let previous = self
            .previous_readout(existing.flat_id, period, Some(id))
            .await?;
        let entry = ledger::compute(dto.reading(), previous)?;

        let sql = returning_gas_usage(
            r#"
            UPDATE gas_usages
            SET month = $2, year = $3, unit_readout = $4, unit_cost = $5,
                units_used = $6, bill_total = $7, bill_paid = $8, status = $9,
                updated_at = NOW()
            WHERE id = $1
            "#,
        );

        let usage = bind_entry(
            sqlx::query_as::<_, GasUsage>(&sql)
                .bind(id)
                .bind(period.month)
                .bind(period.year),
            &entry,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, GAS_USAGE_WRITE_ERRORS, false))?
        .ok_or_else(not_found)?;

        tracing::info!(gas_usage_id = %id, period = %period, "Gas usage updated");
        Ok(usage.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM gas_usages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, GAS_USAGE_WRITE_ERRORS, true))?;

        if result.rows_affected() == 0 {
            return Err(not_found());
        }

        tracing::info!(gas_usage_id = %id, "Gas usage deleted");
        Ok(())
    }

    /// Readout recorded for the month before `period`, ignoring `exclude`.
    async fn previous_readout(
        &self,
        flat_id: Uuid,
        period: Period,
        exclude: Option<Uuid>,
    ) -> Result<Option<Decimal>> {
        let previous = period.previous();
        sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT unit_readout FROM gas_usages
            WHERE flat_id = $1 AND month = $2 AND year = $3
              AND ($4::uuid IS NULL OR id <> $4)
            "#,
        )
        .bind(flat_id)
        .bind(previous.month)
        .bind(previous.year)
        .bind(exclude)
        .fetch_optional(&self.pool)
        .await
        .map_err(read_error("fetch previous gas readout"))
    }
}

type GasUsageQuery<'q> =
    sqlx::query::QueryAs<'q, sqlx::Postgres, GasUsage, sqlx::postgres::PgArguments>;

/// Binds `$4..$9` from a computed ledger entry.
fn bind_entry<'q>(query: GasUsageQuery<'q>, entry: &LedgerEntry) -> GasUsageQuery<'q> {
    query
        .bind(entry.unit_readout)
        .bind(entry.unit_cost)
        .bind(entry.units_used)
        .bind(entry.bill_total)
        .bind(entry.bill_paid)
        .bind(entry.status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{lazy_pool, seed_building, seed_flat};

    #[tokio::test]
    async fn test_create_rejects_invalid_period_before_querying() {
        let service = GasUsageService::new(lazy_pool());
        let dto = CreateGasUsageDto {
            flat_id: Uuid::new_v4(),
            month: 0,
            year: 2024,
            unit_readout: Decimal::ONE,
            unit_cost: Decimal::ONE,
            bill_paid: Decimal::ZERO,
        };

        let err = service.create(dto).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_returning_statement_joins_flat_number() {
        let sql = returning_gas_usage("DELETE FROM gas_usages WHERE id = $1");
        assert!(sql.starts_with("WITH written AS (DELETE FROM gas_usages WHERE id = $1 RETURNING *)"));
        assert!(sql.contains("f.flat_number"));
    }

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn reading(flat_id: Uuid, month: i32, readout: &str, cost: &str, paid: &str) -> CreateGasUsageDto {
        CreateGasUsageDto {
            flat_id,
            month,
            year: 2024,
            unit_readout: dec(readout),
            unit_cost: dec(cost),
            bill_paid: dec(paid),
        }
    }

    async fn seeded(pool: &PgPool) -> (Uuid, Uuid) {
        let building_id = seed_building(pool, "B1").await;
        let flat_id = seed_flat(pool, building_id, "A1").await;
        (building_id, flat_id)
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_range_includes_both_end_periods(pool: PgPool) {
        let (building_id, flat_id) = seeded(&pool).await;
        let service = GasUsageService::new(pool);

        for (month, readout) in [(5, "10"), (6, "20"), (7, "30"), (8, "40"), (9, "50"), (10, "60")] {
            service
                .create(reading(flat_id, month, readout, "1", "0"))
                .await
                .unwrap();
        }

        let range = PeriodRange::from_bounds(Some("2024-06"), Some("2024-09")).unwrap();
        let months: Vec<i32> = service
            .list_for_flat(flat_id, range, None)
            .await
            .unwrap()
            .into_iter()
            .map(|usage| usage.month)
            .collect();
        assert_eq!(months, vec![9, 8, 7, 6]);

        let open = service
            .list_for_building(building_id, range, Some(false))
            .await
            .unwrap();
        assert_eq!(open.len(), 4);
        assert!(service
            .list_for_building(building_id, range, Some(true))
            .await
            .unwrap()
            .is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_stored_row_matches_computed_ledger(pool: PgPool) {
        let (_, flat_id) = seeded(&pool).await;
        let service = GasUsageService::new(pool);

        let err = service
            .create(reading(flat_id, 6, "50", "12.5", "624.995"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let june = service
            .create(reading(flat_id, 6, "50", "12.5", "624.99"))
            .await
            .unwrap();
        assert_eq!(june.bill_total, dec("625"));
        assert_eq!(june.bill_paid, dec("624.99"));
        assert!(!june.status);

        let err = service
            .create(reading(flat_id, 7, "60.0004", "1", "0"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let july = service
            .create(reading(flat_id, 7, "60.125", "1", "11"))
            .await
            .unwrap();
        assert_eq!(july.units_used, dec("10.125"));
        assert_eq!(july.bill_total, dec("11"));
        assert!(july.status);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_duplicate_period_is_a_conflict(pool: PgPool) {
        let (_, flat_id) = seeded(&pool).await;
        let service = GasUsageService::new(pool);

        service.create(reading(flat_id, 6, "100", "10", "0")).await.unwrap();
        let err = service
            .create(reading(flat_id, 6, "120", "10", "0"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Conflict(ref m) if m == "A gas usage record already exists for this flat and period"
        ));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_rejected_update_leaves_record_unchanged(pool: PgPool) {
        let (_, flat_id) = seeded(&pool).await;
        let service = GasUsageService::new(pool);

        service.create(reading(flat_id, 6, "100", "10", "0")).await.unwrap();
        let july = service.create(reading(flat_id, 7, "150", "10", "0")).await.unwrap();

        let err = service
            .update(
                july.id,
                UpdateGasUsageDto {
                    month: 7,
                    year: 2024,
                    unit_readout: dec("90"),
                    unit_cost: dec("10"),
                    bill_paid: dec("0"),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ref m) if m == "Unit readout can't be lower than previous month's readout"
        ));

        let stored = service.find_by_id(july.id).await.unwrap().unwrap();
        assert_eq!(stored.unit_readout, dec("150"));
        assert_eq!(stored.units_used, dec("50"));
        assert_eq!(stored.bill_total, dec("500"));
        assert_eq!(stored.updated_at, july.updated_at);
    }
}
