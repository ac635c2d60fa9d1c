pub mod purchase_service;
pub mod usage_service;

pub use purchase_service::PurchaseLogService;
pub use usage_service::UsageLogService;
