use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::{map_write_error, read_error, WriteErrors};
use crate::core::error::{AppError, Result};
use crate::features::bills::dtos::{BillRemainingDto, BillResponseDto, CreateBillDto, UpdateBillDto};
use crate::features::bills::models::Bill;
use crate::shared::batch::{run_batch, BatchReport};
use crate::shared::period::Period;
use crate::shared::types::PaginationQuery;

const BILL_WRITE_ERRORS: WriteErrors = WriteErrors {
    conflict: "A bill already exists for this flat and period",
    reference: "Couldn't find any flat with this ID",
};

const BILL_FIELDS: &str = r#"
    b.id, b.flat_id, f.flat_number, b.month, b.year,
    b.bill_amount, b.paid_amount, b.created_at, b.updated_at
"#;

const UNPAID_FILTER: &str = "b.paid_amount < b.bill_amount";

fn not_found() -> AppError {
    AppError::NotFound("Couldn't find any bill with this ID".to_string())
}

fn returning_bill(statement: &str) -> String {
    format!(
        "WITH written AS ({} RETURNING *) SELECT {} FROM written b JOIN flats f ON f.id = b.flat_id",
        statement, BILL_FIELDS
    )
}

pub struct BillService {
    pool: PgPool,
}

impl BillService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, dto: CreateBillDto) -> Result<BillResponseDto> {
        let period = Period::new(dto.month, dto.year)?;
        let sql = returning_bill(
            "INSERT INTO bills (flat_id, month, year, bill_amount, paid_amount) VALUES ($1, $2, $3, $4, $5)",
        );

        let bill = sqlx::query_as::<_, Bill>(&sql)
            .bind(dto.flat_id)
            .bind(period.month)
            .bind(period.year)
            .bind(dto.bill_amount)
            .bind(dto.paid_amount)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, BILL_WRITE_ERRORS, false))?;

        tracing::info!(bill_id = %bill.id, flat_id = %bill.flat_id, period = %period, "Bill created");
        Ok(bill.into())
    }

    pub async fn create_many(&self, rows: Vec<serde_json::Value>) -> Result<BatchReport> {
        run_batch(rows, |dto: CreateBillDto| async move {
            self.create(dto).await.map(|_| ())
        })
        .await
    }

    /// All bills, newest period first. `None` returns every row.
    pub async fn list(
        &self,
        pagination: Option<&PaginationQuery>,
    ) -> Result<(Vec<BillResponseDto>, i64)> {
        self.list_where("TRUE", None, pagination).await
    }

    pub async fn list_for_flat(
        &self,
        flat_id: Uuid,
        unpaid_only: bool,
        pagination: Option<&PaginationQuery>,
    ) -> Result<(Vec<BillResponseDto>, i64)> {
        let filter = if unpaid_only {
            format!("b.flat_id = $1 AND {}", UNPAID_FILTER)
        } else {
            "b.flat_id = $1".to_string()
        };
        self.list_where(&filter, Some(flat_id), pagination).await
    }

    /// `filter` may reference `$1` only when `flat_id` is given.
    async fn list_where(
        &self,
        filter: &str,
        flat_id: Option<Uuid>,
        pagination: Option<&PaginationQuery>,
    ) -> Result<(Vec<BillResponseDto>, i64)> {
        let next = if flat_id.is_some() { 2 } else { 1 };
        let page_clause = match pagination {
            Some(_) => format!("LIMIT ${} OFFSET ${}", next, next + 1),
            None => String::new(),
        };

        let sql = format!(
            r#"
            SELECT {}
            FROM bills b
            JOIN flats f ON f.id = b.flat_id
            WHERE {}
            ORDER BY b.year DESC, b.month DESC, f.flat_number
            {}
            "#,
            BILL_FIELDS, filter, page_clause
        );
        let count_sql = format!("SELECT COUNT(*) FROM bills b WHERE {}", filter);

        let mut query = sqlx::query_as::<_, Bill>(&sql);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(flat_id) = flat_id {
            query = query.bind(flat_id);
            count_query = count_query.bind(flat_id);
        }
        if let Some(pagination) = pagination {
            query = query.bind(pagination.limit()).bind(pagination.offset());
        }

        let bills = query
            .fetch_all(&self.pool)
            .await
            .map_err(read_error("list bills"))?;
        let total = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(read_error("count bills"))?;

        Ok((bills.into_iter().map(BillResponseDto::from).collect(), total))
    }

    /// Outstanding total over every bill of the flat; 0 when it has none.
    pub async fn remaining_for_flat(&self, flat_id: Uuid) -> Result<BillRemainingDto> {
        let remaining = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(bill_amount - paid_amount), 0) FROM bills WHERE flat_id = $1",
        )
        .bind(flat_id)
        .fetch_one(&self.pool)
        .await
        .map_err(read_error("sum remaining bills"))?;

        Ok(BillRemainingDto {
            flat_id,
            remaining_amount: remaining,
        })
    }

    pub async fn update(&self, id: Uuid, dto: UpdateBillDto) -> Result<BillResponseDto> {
        let period = Period::new(dto.month, dto.year)?;
        let sql = returning_bill(
            r#"
            UPDATE bills
            SET month = $2, year = $3, bill_amount = $4, paid_amount = $5, updated_at = NOW()
            WHERE id = $1
            "#,
        );

        let bill = sqlx::query_as::<_, Bill>(&sql)
            .bind(id)
            .bind(period.month)
            .bind(period.year)
            .bind(dto.bill_amount)
            .bind(dto.paid_amount)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, BILL_WRITE_ERRORS, false))?
            .ok_or_else(not_found)?;

        tracing::info!(bill_id = %id, period = %period, "Bill updated");
        Ok(bill.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM bills WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, BILL_WRITE_ERRORS, true))?;

        if result.rows_affected() == 0 {
            return Err(not_found());
        }

        tracing::info!(bill_id = %id, "Bill deleted");
        Ok(())
    }
}
