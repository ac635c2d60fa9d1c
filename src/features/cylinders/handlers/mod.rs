pub mod purchase_handler;
pub mod usage_handler;
