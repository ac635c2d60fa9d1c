pub mod flat_service;

pub use flat_service::FlatService;
