pub mod purchase_log;
pub mod usage_log;

pub use purchase_log::PurchaseLog;
pub use usage_log::UsageLog;
