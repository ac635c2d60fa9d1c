pub mod building_dto;

pub use building_dto::{BuildingResponseDto, CreateBuildingDto, UpdateBuildingDto};
