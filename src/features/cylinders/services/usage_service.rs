use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::{map_write_error, read_error, WriteErrors};
use crate::core::error::{AppError, Result};
use crate::features::cylinders::dtos::{CreateUsageLogDto, UpdateUsageLogDto, UsageLogResponseDto};
use crate::features::cylinders::models::usage_log::{total_cost, UsageLog};
use crate::shared::period::{Period, PeriodRange};

const USAGE_FIELDS: &str = "u.id, u.building_id, b.building_number, u.month, u.year, \
     u.cylinders_used, u.unit_cost, u.total_cost, u.created_at, u.updated_at";

const WRITE_ERRORS: WriteErrors = WriteErrors {
    conflict: "A cylinder usage log already exists for this building and period",
    reference: "Couldn't find any building with this ID",
};

const NOT_FOUND: &str = "Couldn't find any cylinder usage log with this ID";

fn returning(statement: &str) -> String {
    format!(
        "WITH written AS ({} RETURNING *) SELECT {} FROM written u JOIN buildings b ON b.id = u.building_id",
        statement, USAGE_FIELDS
    )
}

pub struct UsageLogService {
    pool: PgPool,
}

impl UsageLogService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, dto: CreateUsageLogDto) -> Result<UsageLogResponseDto> {
        let period = Period::new(dto.month, dto.year)?;
        let total = total_cost(dto.cylinders_used, dto.unit_cost)?;
        let sql = returning(
            "INSERT INTO cylinder_usage_logs \
             (building_id, month, year, cylinders_used, unit_cost, total_cost) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        );

        let log = sqlx::query_as::<_, UsageLog>(&sql)
            .bind(dto.building_id)
            .bind(period.month)
            .bind(period.year)
            .bind(dto.cylinders_used)
            .bind(dto.unit_cost)
            .bind(total)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, WRITE_ERRORS, false))?;

        tracing::info!(
            log_id = %log.id,
            building_id = %log.building_id,
            period = %period,
            "Cylinder usage recorded"
        );
        Ok(log.into())
    }

    pub async fn list_for_building(
        &self,
        building_id: Uuid,
        range: PeriodRange,
    ) -> Result<Vec<UsageLogResponseDto>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM cylinder_usage_logs u
            JOIN buildings b ON b.id = u.building_id
            WHERE u.building_id = $1 AND u.year * 100 + u.month BETWEEN $2 AND $3
            ORDER BY u.year DESC, u.month DESC
            "#,
            USAGE_FIELDS
        );

        let logs = sqlx::query_as::<_, UsageLog>(&sql)
            .bind(building_id)
            .bind(range.start)
            .bind(range.end)
            .fetch_all(&self.pool)
            .await
            .map_err(read_error("list cylinder usage logs"))?;

        Ok(logs.into_iter().map(UsageLogResponseDto::from).collect())
    }

    pub async fn update(&self, id: Uuid, dto: UpdateUsageLogDto) -> Result<UsageLogResponseDto> {
        let period = Period::new(dto.month, dto.year)?;
        let total = total_cost(dto.cylinders_used, dto.unit_cost)?;
        let sql = returning(
            "UPDATE cylinder_usage_logs SET month = $2, year = $3, cylinders_used = $4, \
             unit_cost = $5, total_cost = $6, updated_at = NOW() WHERE id = $1",
        );

        let log = sqlx::query_as::<_, UsageLog>(&sql)
            .bind(id)
            .bind(period.month)
            .bind(period.year)
            .bind(dto.cylinders_used)
            .bind(dto.unit_cost)
            .bind(total)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, WRITE_ERRORS, false))?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

        tracing::info!(log_id = %id, "Cylinder usage updated");
        Ok(log.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM cylinder_usage_logs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, WRITE_ERRORS, true))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(NOT_FOUND.to_string()));
        }

        tracing::info!(log_id = %id, "Cylinder usage deleted");
        Ok(())
    }
}
