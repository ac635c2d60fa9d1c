use crate::core::config::DatabaseConfig;
use crate::core::error::AppError;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .connect(&config.url)
        .await
}

/// Messages used when a write trips a table constraint.
#[derive(Debug, Clone, Copy)]
pub struct WriteErrors {
    /// Unique constraint (natural key) violated
    pub conflict: &'static str,
    /// Referenced parent row does not exist, or still has dependants on delete
    pub reference: &'static str,
}

/// Map a failed INSERT/UPDATE/DELETE onto the error taxonomy.
///
/// Unique violations become `Conflict`; foreign key violations become
/// `NotFound` on insert/update and `Conflict` on delete (a parent row still
/// referenced by children). Numbers too large for their column are a
/// `Validation` error. Everything else stays a `Database` error.
pub fn map_write_error(e: sqlx::Error, messages: WriteErrors, on_delete: bool) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        match db_err.code().as_deref() {
            Some(UNIQUE_VIOLATION) => return AppError::Conflict(messages.conflict.to_string()),
            Some(FOREIGN_KEY_VIOLATION) if on_delete => {
                return AppError::Conflict(messages.reference.to_string())
            }
            Some(FOREIGN_KEY_VIOLATION) => {
                return AppError::NotFound(messages.reference.to_string())
            }
            Some(NUMERIC_VALUE_OUT_OF_RANGE) => {
                return AppError::Validation("A numeric value is out of range".to_string())
            }
            _ => {}
        }
    }

    tracing::error!("Write failed: {:?}", e);
    AppError::Database(e)
}

/// Error mapper for plain reads.
pub fn read_error(context: &'static str) -> impl Fn(sqlx::Error) -> AppError {
    move |e| {
        tracing::error!("Failed to {}: {:?}", context, e);
        AppError::Database(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MESSAGES: WriteErrors = WriteErrors {
        conflict: "duplicate",
        reference: "missing parent",
    };

    #[test]
    fn test_non_constraint_errors_stay_database_errors() {
        let err = map_write_error(sqlx::Error::RowNotFound, MESSAGES, false);
        assert!(matches!(err, AppError::Database(_)));

        let err = map_write_error(sqlx::Error::PoolTimedOut, MESSAGES, true);
        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn test_read_error_wraps_database() {
        let map = read_error("load things");
        assert!(matches!(map(sqlx::Error::RowNotFound), AppError::Database(_)));
    }
}
