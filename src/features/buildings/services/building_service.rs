use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::{map_write_error, read_error, WriteErrors};
use crate::core::error::{AppError, Result};
use crate::features::buildings::dtos::{BuildingResponseDto, CreateBuildingDto, UpdateBuildingDto};
use crate::features::buildings::models::Building;
use crate::shared::validation::blank_to_none;

const BUILDING_WRITE_ERRORS: WriteErrors = WriteErrors {
    conflict: "A building with this building number already exists",
    reference: "Building still has flats. Delete or move them first",
};

const BUILDING_COLUMNS: &str = "id, building_number, name, created_at, updated_at";

fn not_found() -> AppError {
    AppError::NotFound("Couldn't find any building with this ID".to_string())
}

pub struct BuildingService {
    pool: PgPool,
}

impl BuildingService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, dto: CreateBuildingDto) -> Result<BuildingResponseDto> {
        let building = sqlx::query_as::<_, Building>(&format!(
            "INSERT INTO buildings (building_number, name) VALUES ($1, $2) RETURNING {}",
            BUILDING_COLUMNS
        ))
        .bind(dto.building_number.trim())
        .bind(blank_to_none(dto.name))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, BUILDING_WRITE_ERRORS, false))?;

        tracing::info!(building_id = %building.id, "Building created");
        Ok(building.into())
    }

    pub async fn list(&self) -> Result<Vec<BuildingResponseDto>> {
        let buildings = sqlx::query_as::<_, Building>(&format!(
            "SELECT {} FROM buildings ORDER BY building_number",
            BUILDING_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(read_error("list buildings"))?;

        Ok(buildings.into_iter().map(BuildingResponseDto::from).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<BuildingResponseDto> {
        self.find_by_id(id)
            .await?
            .map(BuildingResponseDto::from)
            .ok_or_else(not_found)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Building>> {
        sqlx::query_as::<_, Building>(&format!(
            "SELECT {} FROM buildings WHERE id = $1",
            BUILDING_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(read_error("fetch building"))
    }

    pub async fn update(&self, id: Uuid, dto: UpdateBuildingDto) -> Result<BuildingResponseDto> {
        let building = sqlx::query_as::<_, Building>(&format!(
            r#"
            UPDATE buildings
            SET building_number = COALESCE(TRIM($2::text), building_number),
                name = CASE WHEN $3::text IS NULL THEN name ELSE NULLIF(TRIM($3), '') END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            BUILDING_COLUMNS
        ))
        .bind(id)
        .bind(dto.building_number)
        .bind(dto.name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, BUILDING_WRITE_ERRORS, false))?
        .ok_or_else(not_found)?;

        tracing::info!(building_id = %id, "Building updated");
        Ok(building.into())
    }

    /// Fails with `Conflict` while flats still reference the building.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM buildings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, BUILDING_WRITE_ERRORS, true))?;

        if result.rows_affected() == 0 {
            return Err(not_found());
        }

        tracing::info!(building_id = %id, "Building deleted");
        Ok(())
    }
}
