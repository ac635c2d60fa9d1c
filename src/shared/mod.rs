pub mod batch;
pub mod constants;
pub mod period;
pub mod test_helpers;
pub mod types;
pub mod validation;
