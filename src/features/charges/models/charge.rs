use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::database::WriteErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeKind {
    Contribution,
    ServiceCharge,
}

impl ChargeKind {
    pub fn table(self) -> &'static str {
        match self {
            ChargeKind::Contribution => "contributions",
            ChargeKind::ServiceCharge => "service_charges",
        }
    }

    /// Plural noun used in bulk summaries
    pub fn plural(self) -> &'static str {
        match self {
            ChargeKind::Contribution => "contributions",
            ChargeKind::ServiceCharge => "service charges",
        }
    }

    pub fn write_errors(self) -> WriteErrors {
        match self {
            ChargeKind::Contribution => WriteErrors {
                conflict: "A contribution already exists for this flat and period",
                reference: "Couldn't find any flat with this ID",
            },
            ChargeKind::ServiceCharge => WriteErrors {
                conflict: "A service charge already exists for this flat and period",
                reference: "Couldn't find any flat with this ID",
            },
        }
    }

    pub fn not_found_message(self) -> &'static str {
        match self {
            ChargeKind::Contribution => "Couldn't find any contribution with this ID",
            ChargeKind::ServiceCharge => "Couldn't find any service charge with this ID",
        }
    }
}

/// Charge row joined with its flat number
#[derive(Debug, Clone, FromRow)]
pub struct Charge {
    pub id: Uuid,
    pub flat_id: Uuid,
    pub flat_number: String,
    pub month: i32,
    pub year: i32,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_use_their_own_table_and_messages() {
        assert_eq!(ChargeKind::Contribution.table(), "contributions");
        assert_eq!(ChargeKind::ServiceCharge.table(), "service_charges");
        assert_eq!(ChargeKind::ServiceCharge.plural(), "service charges");
        assert!(ChargeKind::ServiceCharge
            .write_errors()
            .conflict
            .starts_with("A service charge"));
    }
}
