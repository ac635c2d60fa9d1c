pub mod gas_usage_dto;

pub use gas_usage_dto::{
    CreateGasUsageDto, GasUsageQuery, GasUsageResponseDto, UpdateGasUsageDto,
};
