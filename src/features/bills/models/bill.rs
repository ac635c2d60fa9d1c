use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Bill row joined with its flat number
#[derive(Debug, Clone, FromRow)]
pub struct Bill {
    pub id: Uuid,
    pub flat_id: Uuid,
    pub flat_number: String,
    pub month: i32,
    pub year: i32,
    pub bill_amount: Decimal,
    pub paid_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bill {
    /// Negative when the flat paid more than it was billed
    pub fn remaining(&self) -> Decimal {
        self.bill_amount - self.paid_amount
    }

    pub fn is_paid(&self) -> bool {
        self.paid_amount >= self.bill_amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bill(amount: i64, paid: i64) -> Bill {
        Bill {
            id: Uuid::new_v4(),
            flat_id: Uuid::new_v4(),
            flat_number: "A1".to_string(),
            month: 6,
            year: 2024,
            bill_amount: Decimal::from(amount),
            paid_amount: Decimal::from(paid),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_remaining_and_paid() {
        let open = bill(500, 200);
        assert_eq!(open.remaining(), Decimal::from(300));
        assert!(!open.is_paid());

        let overpaid = bill(500, 600);
        assert_eq!(overpaid.remaining(), Decimal::from(-100));
        assert!(overpaid.is_paid());
    }
}
