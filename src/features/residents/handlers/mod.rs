pub mod resident_handler;

pub use resident_handler::*;
