pub mod purchase_dto;
pub mod usage_dto;

pub use purchase_dto::{CreatePurchaseLogDto, PurchaseLogResponseDto, UpdatePurchaseLogDto};
pub use usage_dto::{CreateUsageLogDto, UpdateUsageLogDto, UsageLogResponseDto};
