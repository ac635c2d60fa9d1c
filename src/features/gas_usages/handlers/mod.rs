pub mod gas_usage_handler;
