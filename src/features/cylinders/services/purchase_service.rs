use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::{map_write_error, read_error, WriteErrors};
use crate::core::error::{AppError, Result};
use crate::features::cylinders::dtos::{
    CreatePurchaseLogDto, PurchaseLogResponseDto, UpdatePurchaseLogDto,
};
use crate::features::cylinders::models::PurchaseLog;
use crate::shared::period::{Period, PeriodRange};

const PURCHASE_FIELDS: &str = "p.id, p.building_id, b.building_number, p.month, p.year, \
     p.cylinders_purchased, p.dealer, p.cost, p.other_cost, p.created_at, p.updated_at";

const WRITE_ERRORS: WriteErrors = WriteErrors {
    conflict: "A cylinder purchase log already exists for this building and period",
    reference: "Couldn't find any building with this ID",
};

const NOT_FOUND: &str = "Couldn't find any cylinder purchase log with this ID";

fn returning(statement: &str) -> String {
    format!(
        "WITH written AS ({} RETURNING *) SELECT {} FROM written p JOIN buildings b ON b.id = p.building_id",
        statement, PURCHASE_FIELDS
    )
}

pub struct PurchaseLogService {
    pool: PgPool,
}

impl PurchaseLogService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, dto: CreatePurchaseLogDto) -> Result<PurchaseLogResponseDto> {
        let period = Period::new(dto.month, dto.year)?;
        let sql = returning(
            "INSERT INTO cylinder_purchase_logs \
             (building_id, month, year, cylinders_purchased, dealer, cost, other_cost) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        );

        let log = sqlx::query_as::<_, PurchaseLog>(&sql)
            .bind(dto.building_id)
            .bind(period.month)
            .bind(period.year)
            .bind(dto.cylinders_purchased)
            .bind(dto.dealer.trim())
            .bind(dto.cost)
            .bind(dto.other_cost)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, WRITE_ERRORS, false))?;

        tracing::info!(
            log_id = %log.id,
            building_id = %log.building_id,
            period = %period,
            "Cylinder purchase recorded"
        );
        Ok(log.into())
    }

    pub async fn list_for_building(
        &self,
        building_id: Uuid,
        range: PeriodRange,
    ) -> Result<Vec<PurchaseLogResponseDto>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM cylinder_purchase_logs p
            JOIN buildings b ON b.id = p.building_id
            WHERE p.building_id = $1 AND p.year * 100 + p.month BETWEEN $2 AND $3
            ORDER BY p.year DESC, p.month DESC
            "#,
            PURCHASE_FIELDS
        );

        let logs = sqlx::query_as::<_, PurchaseLog>(&sql)
            .bind(building_id)
            .bind(range.start)
            .bind(range.end)
            .fetch_all(&self.pool)
            .await
            .map_err(read_error("list cylinder purchase logs"))?;

        Ok(logs.into_iter().map(PurchaseLogResponseDto::from).collect())
    }

    pub async fn update(&self, id: Uuid, dto: UpdatePurchaseLogDto) -> Result<PurchaseLogResponseDto> {
        let period = Period::new(dto.month, dto.year)?;
        let sql = returning(
            "UPDATE cylinder_purchase_logs SET month = $2, year = $3, cylinders_purchased = $4, \
             dealer = $5, cost = $6, other_cost = $7, updated_at = NOW() WHERE id = $1",
        );

        let log = sqlx::query_as::<_, PurchaseLog>(&sql)
            .bind(id)
            .bind(period.month)
            .bind(period.year)
            .bind(dto.cylinders_purchased)
            .bind(dto.dealer.trim())
            .bind(dto.cost)
            .bind(dto.other_cost)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, WRITE_ERRORS, false))?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

        tracing::info!(log_id = %id, "Cylinder purchase updated");
        Ok(log.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM cylinder_purchase_logs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, WRITE_ERRORS, true))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(NOT_FOUND.to_string()));
        }

        tracing::info!(log_id = %id, "Cylinder purchase deleted");
        Ok(())
    }
}
