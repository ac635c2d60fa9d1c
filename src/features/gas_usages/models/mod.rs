pub mod gas_usage;

pub use gas_usage::GasUsage;
