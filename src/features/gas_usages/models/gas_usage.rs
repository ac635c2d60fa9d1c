use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Gas usage row joined with its flat number
#[derive(Debug, Clone, FromRow)]
pub struct GasUsage {
    pub id: Uuid,
    pub flat_id: Uuid,
    pub flat_number: String,
    pub month: i32,
    pub year: i32,
    pub unit_readout: Decimal,
    pub unit_cost: Decimal,
    pub units_used: Decimal,
    pub bill_total: Decimal,
    pub bill_paid: Decimal,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
