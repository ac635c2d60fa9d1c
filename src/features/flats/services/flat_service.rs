use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::{map_write_error, read_error, WriteErrors};
use crate::core::error::{AppError, Result};
use crate::features::flats::dtos::flat_dto::normalize_flat_number;
use crate::features::flats::dtos::{CreateFlatDto, FlatResponseDto, UpdateFlatDto};
use crate::features::flats::models::Flat;
use crate::shared::validation::blank_to_none;

const FLAT_WRITE_ERRORS: WriteErrors = WriteErrors {
    conflict: "A flat with this flat number already exists",
    reference: "Couldn't find any building with this ID",
};

const FLAT_SELECT: &str = r#"
    SELECT f.id, f.building_id, b.building_number, f.flat_number,
           f.owner_name, f.owner_phone, f.owner_email,
           f.renter_name, f.renter_phone, f.renter_email,
           f.status, f.created_at, f.updated_at
    FROM flats f
    JOIN buildings b ON b.id = f.building_id
"#;

/// Builds `WITH written AS (<stmt> RETURNING *) SELECT ... FROM written`
fn returning_flat(statement: &str) -> String {
    format!(
        r#"
        WITH written AS ({} RETURNING *)
        SELECT f.id, f.building_id, b.building_number, f.flat_number,
               f.owner_name, f.owner_phone, f.owner_email,
               f.renter_name, f.renter_phone, f.renter_email,
               f.status, f.created_at, f.updated_at
        FROM written f
        JOIN buildings b ON b.id = f.building_id
        "#,
        statement
    )
}

pub struct FlatService {
    pool: PgPool,
}

impl FlatService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, dto: CreateFlatDto) -> Result<FlatResponseDto> {
        let sql = returning_flat(
            r#"
            INSERT INTO flats (building_id, flat_number, owner_name, owner_phone, owner_email,
                               renter_name, renter_phone, renter_email, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        );

        let flat = sqlx::query_as::<_, Flat>(&sql)
            .bind(dto.building_id)
            .bind(normalize_flat_number(&dto.flat_number))
            .bind(blank_to_none(dto.owner_name))
            .bind(dto.owner_phone.trim())
            .bind(blank_to_none(dto.owner_email))
            .bind(blank_to_none(dto.renter_name))
            .bind(blank_to_none(dto.renter_phone))
            .bind(blank_to_none(dto.renter_email))
            .bind(dto.status)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, FLAT_WRITE_ERRORS, false))?;

        tracing::info!(flat_id = %flat.id, flat_number = %flat.flat_number, "Flat created");
        Ok(flat.into())
    }

    pub async fn list(&self) -> Result<Vec<FlatResponseDto>> {
        let flats = sqlx::query_as::<_, Flat>(&format!(
            "{} ORDER BY b.building_number, f.flat_number",
            FLAT_SELECT
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(read_error("list flats"))?;

        Ok(flats.into_iter().map(FlatResponseDto::from).collect())
    }

    /// Flats of one building; 404 when the building itself does not exist.
    pub async fn list_by_building(&self, building_id: Uuid) -> Result<Vec<FlatResponseDto>> {
        let building_exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM buildings WHERE id = $1)")
                .bind(building_id)
                .fetch_one(&self.pool)
                .await
                .map_err(read_error("check building"))?;

        if !building_exists {
            return Err(AppError::NotFound(
                "Couldn't find any building with this ID".to_string(),
            ));
        }

        let flats = sqlx::query_as::<_, Flat>(&format!(
            "{} WHERE f.building_id = $1 ORDER BY f.flat_number",
            FLAT_SELECT
        ))
        .bind(building_id)
        .fetch_all(&self.pool)
        .await
        .map_err(read_error("list flats by building"))?;

        Ok(flats.into_iter().map(FlatResponseDto::from).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<FlatResponseDto> {
        self.find_by_id(id)
            .await?
            .map(FlatResponseDto::from)
            .ok_or_else(|| AppError::NotFound("Couldn't find any flat with this ID".to_string()))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Flat>> {
        sqlx::query_as::<_, Flat>(&format!("{} WHERE f.id = $1", FLAT_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(read_error("fetch flat"))
    }

    /// Resident sign-in lookup: flat number plus owner or renter phone.
    pub async fn find_by_credentials(&self, flat_number: &str, phone: &str) -> Result<Option<Flat>> {
        let flat = sqlx::query_as::<_, Flat>(&format!("{} WHERE f.flat_number = $1", FLAT_SELECT))
            .bind(normalize_flat_number(flat_number))
            .fetch_optional(&self.pool)
            .await
            .map_err(read_error("fetch flat by number"))?;

        Ok(flat.filter(|flat| flat.has_phone(phone)))
    }

    pub async fn update(&self, id: Uuid, dto: UpdateFlatDto) -> Result<FlatResponseDto> {
        // NULL parameter keeps the column, '' clears an optional column
        let sql = returning_flat(
            r#"
            UPDATE flats SET
                owner_name = CASE WHEN $2::text IS NULL THEN owner_name ELSE NULLIF(TRIM($2), '') END,
                owner_phone = COALESCE(TRIM($3), owner_phone),
                owner_email = CASE WHEN $4::text IS NULL THEN owner_email ELSE NULLIF(TRIM($4), '') END,
                renter_name = CASE WHEN $5::text IS NULL THEN renter_name ELSE NULLIF(TRIM($5), '') END,
                renter_phone = CASE WHEN $6::text IS NULL THEN renter_phone ELSE NULLIF(TRIM($6), '') END,
                renter_email = CASE WHEN $7::text IS NULL THEN renter_email ELSE NULLIF(TRIM($7), '') END,
                status = COALESCE($8, status),
                updated_at = NOW()
            WHERE id = $1
            "#,
        );

        let flat = sqlx::query_as::<_, Flat>(&sql)
            .bind(id)
            .bind(dto.owner_name)
            .bind(dto.owner_phone)
            .bind(dto.owner_email)
            .bind(dto.renter_name)
            .bind(dto.renter_phone)
            .bind(dto.renter_email)
            .bind(dto.status)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, FLAT_WRITE_ERRORS, false))?
            .ok_or_else(|| AppError::NotFound("Couldn't find any flat with this ID".to_string()))?;

        tracing::info!(flat_id = %flat.id, "Flat updated");
        Ok(flat.into())
    }

    /// Deleting a flat removes its gas, bill, contribution and service charge records.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM flats WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, FLAT_WRITE_ERRORS, true))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(
                "Couldn't find any flat with this ID".to_string(),
            ));
        }

        tracing::info!(flat_id = %id, "Flat deleted");
        Ok(())
    }
}
