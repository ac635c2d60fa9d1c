//! Collect-and-continue bulk creation.
//!
//! A bulk request is rejected as a whole only when its `data` array is
//! missing, empty or oversized. Every row after that is handled on its own:
//! rows that fail to deserialize, fail validation or are refused by the
//! store are reported as `"Entry N: ..."` (1-based) and the remaining rows
//! still run. Committed rows are never rolled back. A server-side failure
//! stops the batch and propagates.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::future::Future;
use utoipa::ToSchema;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::shared::constants::MAX_BATCH_ROWS;

/// Request body of every bulk endpoint
#[derive(Debug, Deserialize, ToSchema)]
pub struct BatchRequest {
    /// Rows to create, each shaped like the single-create body
    #[schema(value_type = Vec<Object>)]
    pub data: Option<serde_json::Value>,
}

impl BatchRequest {
    /// Unpack `data`, enforcing the whole-request rules.
    pub fn into_rows(self) -> Result<Vec<serde_json::Value>> {
        let rows = match self.data {
            Some(serde_json::Value::Array(rows)) if !rows.is_empty() => rows,
            _ => return Err(AppError::BadRequest("Data is invalid or missing".to_string())),
        };

        if rows.len() > MAX_BATCH_ROWS {
            return Err(AppError::BadRequest(format!(
                "A single upload may contain at most {} rows",
                MAX_BATCH_ROWS
            )));
        }

        Ok(rows)
    }
}

#[derive(Debug, Default, Serialize, ToSchema)]
pub struct BatchReport {
    /// Rows created
    pub count: usize,
    /// One message per rejected row
    pub errors: Vec<String>,
}

impl BatchReport {
    fn reject(&mut self, index: usize, message: impl std::fmt::Display) {
        self.errors.push(format!("Entry {}: {}", index + 1, message));
    }

    /// "3 contributions have been created"
    pub fn summary(&self, noun: &str) -> String {
        format!("{} {} have been created", self.count, noun)
    }
}

/// Run `create` for each row sequentially.
pub async fn run_batch<T, F, Fut>(rows: Vec<serde_json::Value>, mut create: F) -> Result<BatchReport>
where
    T: DeserializeOwned + Validate,
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let mut report = BatchReport::default();

    for (index, value) in rows.into_iter().enumerate() {
        let row: T = match serde_json::from_value(value) {
            Ok(row) => row,
            Err(e) => {
                report.reject(index, format!("Data is missing or malformed ({})", e));
                continue;
            }
        };

        if let Err(e) = row.validate() {
            report.reject(index, e);
            continue;
        }

        match create(row).await {
            Ok(()) => report.count += 1,
            Err(e) if e.is_client_error() => report.reject(index, e.client_message()),
            Err(e) => {
                tracing::error!("Bulk create aborted at entry {}: {}", index + 1, e);
                return Err(e);
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;
    use std::sync::Mutex;

    #[derive(Debug, Deserialize, Validate)]
    struct Row {
        flat: String,
        #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
        month: i32,
        year: i32,
    }

    fn rows(values: Vec<serde_json::Value>) -> Vec<serde_json::Value> {
        BatchRequest {
            data: Some(serde_json::Value::Array(values)),
        }
        .into_rows()
        .unwrap()
    }

    #[test]
    fn test_whole_request_rejections() {
        for data in [None, Some(json!([])), Some(json!({ "flat": "A1" })), Some(json!("rows"))] {
            let err = BatchRequest { data }.into_rows().unwrap_err();
            assert!(matches!(err, AppError::BadRequest(ref m) if m == "Data is invalid or missing"));
        }

        let oversized = vec![json!({}); MAX_BATCH_ROWS + 1];
        let err = BatchRequest {
            data: Some(serde_json::Value::Array(oversized)),
        }
        .into_rows()
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_duplicate_row_is_reported_and_batch_continues() {
        // Existing record for (A2, 6, 2024); row 2 collides with it
        let store = Mutex::new(HashSet::from([("A2".to_string(), 6, 2024)]));
        let input = rows(vec![
            json!({ "flat": "A1", "month": 6, "year": 2024 }),
            json!({ "flat": "A2", "month": 6, "year": 2024 }),
            json!({ "flat": "A3", "month": 6, "year": 2024 }),
        ]);

        let report = run_batch(input, |row: Row| {
            let inserted = store
                .lock()
                .unwrap()
                .insert((row.flat.clone(), row.month, row.year));
            async move {
                if inserted {
                    Ok(())
                } else {
                    Err(AppError::Conflict(
                        "A contribution already exists for this flat and period".to_string(),
                    ))
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(report.count, 2);
        assert_eq!(
            report.errors,
            vec!["Entry 2: A contribution already exists for this flat and period".to_string()]
        );
        assert_eq!(store.lock().unwrap().len(), 3);
        assert_eq!(report.summary("contributions"), "2 contributions have been created");
    }

    #[tokio::test]
    async fn test_malformed_and_invalid_rows_do_not_stop_the_batch() {
        let input = rows(vec![
            json!({ "flat": "A1", "year": 2024 }),
            json!({ "flat": "A1", "month": 13, "year": 2024 }),
            json!({ "flat": "A1", "month": 1, "year": 2024 }),
        ]);

        let report = tokio_test::assert_ok!(run_batch(input, |_row: Row| async { Ok(()) }).await);

        assert_eq!(report.count, 1);
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors[0].starts_with("Entry 1: Data is missing or malformed"));
        assert!(report.errors[1].starts_with("Entry 2: "));
        assert!(report.errors[1].contains("Month must be between 1 and 12"));
    }

    #[tokio::test]
    async fn test_server_errors_abort_the_batch() {
        let input = rows(vec![
            json!({ "flat": "A1", "month": 1, "year": 2024 }),
            json!({ "flat": "A2", "month": 1, "year": 2024 }),
            json!({ "flat": "A3", "month": 1, "year": 2024 }),
        ]);
        let calls = Mutex::new(0);

        let result = run_batch(input, |row: Row| {
            *calls.lock().unwrap() += 1;
            async move {
                if row.flat == "A2" {
                    Err(AppError::Database(sqlx::Error::PoolTimedOut))
                } else {
                    Ok(())
                }
            }
        })
        .await;

        assert!(matches!(result, Err(AppError::Database(_))));
        assert_eq!(*calls.lock().unwrap(), 2);
    }
}
