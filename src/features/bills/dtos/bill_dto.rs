use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::bills::models::Bill;
use crate::shared::constants::DEFAULT_PAGE_SIZE;
use crate::shared::types::PaginationQuery;
use crate::shared::validation::money;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBillDto {
    #[serde(alias = "flat")]
    pub flat_id: Uuid,

    #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
    pub month: i32,

    #[validate(range(min = 1970, max = 9999, message = "Year must be between 1970 and 9999"))]
    pub year: i32,

    #[validate(custom(function = "money"))]
    pub bill_amount: Decimal,

    /// Default: 0
    #[serde(default)]
    #[validate(custom(function = "money"))]
    pub paid_amount: Decimal,
}

/// Replaces period and amounts; the flat stays the same.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBillDto {
    #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
    pub month: i32,

    #[validate(range(min = 1970, max = 9999, message = "Year must be between 1970 and 9999"))]
    pub year: i32,

    #[validate(custom(function = "money"))]
    pub bill_amount: Decimal,

    #[validate(custom(function = "money"))]
    pub paid_amount: Decimal,
}

/// `?page=&page_size=&all=`
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BillListQuery {
    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    pub page: i64,

    /// Items per page (default: 15, max: 100)
    #[serde(default = "default_page_size", alias = "limit")]
    pub page_size: i64,

    /// Return every bill without paging
    #[serde(default)]
    pub all: bool,
}

/// `?unpaid=&page=&page_size=&all=`
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FlatBillQuery {
    /// Only bills with `paid_amount < bill_amount`
    #[serde(default)]
    pub unpaid: bool,

    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    pub page: i64,

    /// Items per page (default: 15, max: 100)
    #[serde(default = "default_page_size", alias = "limit")]
    pub page_size: i64,

    /// Return every matching bill without paging
    #[serde(default)]
    pub all: bool,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

fn paging(page: i64, page_size: i64, all: bool) -> Option<PaginationQuery> {
    (!all).then_some(PaginationQuery { page, page_size })
}

impl BillListQuery {
    /// `None` when every bill is requested
    pub fn pagination(&self) -> Option<PaginationQuery> {
        paging(self.page, self.page_size, self.all)
    }
}

impl FlatBillQuery {
    pub fn pagination(&self) -> Option<PaginationQuery> {
        paging(self.page, self.page_size, self.all)
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BillResponseDto {
    pub id: Uuid,
    pub flat_id: Uuid,
    pub flat_number: String,
    pub month: i32,
    pub year: i32,
    pub bill_amount: Decimal,
    pub paid_amount: Decimal,
    /// `bill_amount - paid_amount`
    pub remaining_amount: Decimal,
    pub paid: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Bill> for BillResponseDto {
    fn from(bill: Bill) -> Self {
        Self {
            remaining_amount: bill.remaining(),
            paid: bill.is_paid(),
            id: bill.id,
            flat_id: bill.flat_id,
            flat_number: bill.flat_number,
            month: bill.month,
            year: bill.year,
            bill_amount: bill.bill_amount,
            paid_amount: bill.paid_amount,
            created_at: bill.created_at,
            updated_at: bill.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BillRemainingDto {
    pub flat_id: Uuid,
    /// Sum of `bill_amount - paid_amount` over all of the flat's bills
    pub remaining_amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_query_defaults_and_all() {
        let query: BillListQuery = serde_json::from_value(json!({})).unwrap();
        let page = query.pagination().unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, DEFAULT_PAGE_SIZE);

        let query: BillListQuery = serde_json::from_value(json!({ "all": true })).unwrap();
        assert!(query.pagination().is_none());

        let query: FlatBillQuery =
            serde_json::from_value(json!({ "unpaid": true, "limit": 5 })).unwrap();
        assert!(query.unpaid);
        assert_eq!(query.pagination().unwrap().limit(), 5);
    }

    #[test]
    fn test_create_defaults_paid_amount() {
        let dto: CreateBillDto = serde_json::from_value(json!({
            "flat": Uuid::new_v4(),
            "month": 2,
            "year": 2025,
            "billAmount": 500
        }))
        .unwrap();
        assert!(dto.validate().is_ok());
        assert_eq!(dto.paid_amount, Decimal::ZERO);
    }
}
