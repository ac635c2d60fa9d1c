pub mod flat_dto;

pub use flat_dto::{CreateFlatDto, FlatResponseDto, UpdateFlatDto};
