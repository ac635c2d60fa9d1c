pub mod gas_usage_service;

pub use gas_usage_service::GasUsageService;
