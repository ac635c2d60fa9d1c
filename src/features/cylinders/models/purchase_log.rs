use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Cylinder purchase row joined with its building number
#[derive(Debug, Clone, FromRow)]
pub struct PurchaseLog {
    pub id: Uuid,
    pub building_id: Uuid,
    pub building_number: String,
    pub month: i32,
    pub year: i32,
    pub cylinders_purchased: i32,
    pub dealer: String,
    pub cost: Decimal,
    pub other_cost: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
