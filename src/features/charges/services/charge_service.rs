use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::{map_write_error, read_error};
use crate::core::error::{AppError, Result};
use crate::features::charges::dtos::{ChargeResponseDto, CreateChargeDto, UpdateChargeDto};
use crate::features::charges::models::{Charge, ChargeKind};
use crate::shared::batch::{run_batch, BatchReport};
use crate::shared::period::{Period, PeriodRange};

const CHARGE_FIELDS: &str =
    "c.id, c.flat_id, f.flat_number, c.month, c.year, c.amount, c.created_at, c.updated_at";

/// CRUD over one charge table; one instance per [`ChargeKind`].
pub struct ChargeService {
    pool: PgPool,
    kind: ChargeKind,
}

impl ChargeService {
    pub fn new(pool: PgPool, kind: ChargeKind) -> Self {
        Self { pool, kind }
    }

    pub fn kind(&self) -> ChargeKind {
        self.kind
    }

    fn not_found(&self) -> AppError {
        AppError::NotFound(self.kind.not_found_message().to_string())
    }

    fn returning(&self, statement: &str) -> String {
        format!(
            "WITH written AS ({} RETURNING *) SELECT {} FROM written c JOIN flats f ON f.id = c.flat_id",
            statement, CHARGE_FIELDS
        )
    }

    pub async fn create(&self, dto: CreateChargeDto) -> Result<ChargeResponseDto> {
        let period = Period::new(dto.month, dto.year)?;
        let sql = self.returning(&format!(
            "INSERT INTO {} (flat_id, month, year, amount) VALUES ($1, $2, $3, $4)",
            self.kind.table()
        ));

        let charge = sqlx::query_as::<_, Charge>(&sql)
            .bind(dto.flat_id)
            .bind(period.month)
            .bind(period.year)
            .bind(dto.amount)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, self.kind.write_errors(), false))?;

        tracing::info!(
            kind = self.kind.table(),
            charge_id = %charge.id,
            flat_id = %charge.flat_id,
            period = %period,
            "Charge recorded"
        );
        Ok(charge.into())
    }

    pub async fn create_many(&self, rows: Vec<serde_json::Value>) -> Result<BatchReport> {
        run_batch(rows, |dto: CreateChargeDto| async move {
            self.create(dto).await.map(|_| ())
        })
        .await
    }

    pub async fn list_for_building(
        &self,
        building_id: Uuid,
        range: PeriodRange,
    ) -> Result<Vec<ChargeResponseDto>> {
        self.list_where("f.building_id = $1", building_id, range).await
    }

    pub async fn list_for_flat(
        &self,
        flat_id: Uuid,
        range: PeriodRange,
    ) -> Result<Vec<ChargeResponseDto>> {
        self.list_where("c.flat_id = $1", flat_id, range).await
    }

    async fn list_where(
        &self,
        owner_filter: &str,
        owner_id: Uuid,
        range: PeriodRange,
    ) -> Result<Vec<ChargeResponseDto>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM {} c
            JOIN flats f ON f.id = c.flat_id
            WHERE {} AND c.year * 100 + c.month BETWEEN $2 AND $3
            ORDER BY c.year DESC, c.month DESC, f.flat_number
            "#,
            CHARGE_FIELDS,
            self.kind.table(),
            owner_filter
        );

        let charges = sqlx::query_as::<_, Charge>(&sql)
            .bind(owner_id)
            .bind(range.start)
            .bind(range.end)
            .fetch_all(&self.pool)
            .await
            .map_err(read_error("list charges"))?;

        Ok(charges.into_iter().map(ChargeResponseDto::from).collect())
    }

    pub async fn update(&self, id: Uuid, dto: UpdateChargeDto) -> Result<ChargeResponseDto> {
        let period = Period::new(dto.month, dto.year)?;
        let sql = self.returning(&format!(
            "UPDATE {} SET month = $2, year = $3, amount = $4, updated_at = NOW() WHERE id = $1",
            self.kind.table()
        ));

        let charge = sqlx::query_as::<_, Charge>(&sql)
            .bind(id)
            .bind(period.month)
            .bind(period.year)
            .bind(dto.amount)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, self.kind.write_errors(), false))?
            .ok_or_else(|| self.not_found())?;

        tracing::info!(kind = self.kind.table(), charge_id = %id, "Charge updated");
        Ok(charge.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", self.kind.table()))
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, self.kind.write_errors(), true))?;

        if result.rows_affected() == 0 {
            return Err(self.not_found());
        }

        tracing::info!(kind = self.kind.table(), charge_id = %id, "Charge deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{lazy_pool, seed_building, seed_flat};
    use rust_decimal::Decimal;
    use serde_json::json;

    #[tokio::test]
    async fn test_statements_target_the_kind_table() {
        let service = ChargeService::new(lazy_pool(), ChargeKind::ServiceCharge);
        let sql = service.returning("DELETE FROM service_charges WHERE id = $1");
        assert!(sql.contains("DELETE FROM service_charges"));
        assert!(sql.contains("JOIN flats f"));
        assert_eq!(service.kind(), ChargeKind::ServiceCharge);
    }

    fn contribution(flat_id: Uuid, month: i32, year: i32, amount: i64) -> CreateChargeDto {
        CreateChargeDto {
            flat_id,
            month,
            year,
            amount: Decimal::from(amount),
        }
    }

    fn range(starting: &str, ending: &str) -> PeriodRange {
        PeriodRange::from_bounds(Some(starting), Some(ending)).unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_range_includes_both_end_periods(pool: PgPool) {
        let building_id = seed_building(&pool, "B1").await;
        let flat_id = seed_flat(&pool, building_id, "A1").await;
        let service = ChargeService::new(pool, ChargeKind::Contribution);

        for month in 5..=10 {
            service.create(contribution(flat_id, month, 2024, 100)).await.unwrap();
        }

        let months: Vec<i32> = service
            .list_for_flat(flat_id, range("2024-06", "2024-09"))
            .await
            .unwrap()
            .into_iter()
            .map(|charge| charge.month)
            .collect();
        assert_eq!(months, vec![9, 8, 7, 6]);

        let in_building = service
            .list_for_building(building_id, range("2024-06", "2024-09"))
            .await
            .unwrap();
        assert_eq!(in_building.len(), 4);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_range_spans_the_new_year(pool: PgPool) {
        let building_id = seed_building(&pool, "B1").await;
        let flat_id = seed_flat(&pool, building_id, "A1").await;
        let service = ChargeService::new(pool, ChargeKind::ServiceCharge);

        service.create(contribution(flat_id, 12, 2023, 50)).await.unwrap();
        service.create(contribution(flat_id, 1, 2024, 50)).await.unwrap();
        service.create(contribution(flat_id, 3, 2024, 50)).await.unwrap();

        let listed = service
            .list_for_flat(flat_id, range("2023-11", "2024-02"))
            .await
            .unwrap();
        let periods: Vec<(i32, i32)> = listed.iter().map(|c| (c.year, c.month)).collect();
        assert_eq!(periods, vec![(2024, 1), (2023, 12)]);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_duplicate_period_is_a_conflict(pool: PgPool) {
        let building_id = seed_building(&pool, "B1").await;
        let flat_id = seed_flat(&pool, building_id, "A1").await;
        let service = ChargeService::new(pool, ChargeKind::Contribution);

        service.create(contribution(flat_id, 6, 2024, 100)).await.unwrap();
        let err = service
            .create(contribution(flat_id, 6, 2024, 250))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::Conflict(ref m) if m == "A contribution already exists for this flat and period"
        ));
        let stored = service
            .list_for_flat(flat_id, range("2024-06", "2024-06"))
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].amount, Decimal::from(100));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_unknown_flat_is_not_found(pool: PgPool) {
        let service = ChargeService::new(pool, ChargeKind::Contribution);
        let err = service
            .create(contribution(Uuid::new_v4(), 6, 2024, 100))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Couldn't find any flat with this ID"));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_rejected_update_leaves_record_unchanged(pool: PgPool) {
        let building_id = seed_building(&pool, "B1").await;
        let flat_id = seed_flat(&pool, building_id, "A1").await;
        let service = ChargeService::new(pool, ChargeKind::Contribution);

        service.create(contribution(flat_id, 6, 2024, 100)).await.unwrap();
        let july = service.create(contribution(flat_id, 7, 2024, 200)).await.unwrap();

        let err = service
            .update(
                july.id,
                UpdateChargeDto {
                    month: 6,
                    year: 2024,
                    amount: Decimal::from(999),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let stored = service
            .list_for_flat(flat_id, range("2024-07", "2024-07"))
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, july.id);
        assert_eq!(stored[0].amount, Decimal::from(200));
        assert_eq!(stored[0].updated_at, july.updated_at);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_bulk_reports_the_duplicate_row_and_keeps_the_rest(pool: PgPool) {
        let building_id = seed_building(&pool, "B1").await;
        let a1 = seed_flat(&pool, building_id, "A1").await;
        let a2 = seed_flat(&pool, building_id, "A2").await;
        let a3 = seed_flat(&pool, building_id, "A3").await;
        let service = ChargeService::new(pool, ChargeKind::Contribution);

        service.create(contribution(a2, 6, 2024, 80)).await.unwrap();

        let report = service
            .create_many(vec![
                json!({ "flat": a1, "month": 6, "year": 2024, "amount": 100 }),
                json!({ "flat": a2, "month": 6, "year": 2024, "amount": 100 }),
                json!({ "flat": a3, "month": 6, "year": 2024, "amount": 100 }),
            ])
            .await
            .unwrap();

        assert_eq!(report.count, 2);
        assert_eq!(
            report.errors,
            vec!["Entry 2: A contribution already exists for this flat and period".to_string()]
        );
        assert_eq!(report.summary(service.kind().plural()), "2 contributions have been created");

        let stored = service
            .list_for_building(building_id, range("2024-06", "2024-06"))
            .await
            .unwrap();
        assert_eq!(stored.len(), 3);
        let a2_row = stored.iter().find(|c| c.flat_id == a2).unwrap();
        assert_eq!(a2_row.amount, Decimal::from(80));
    }
}
