pub mod charge_dto;

pub use charge_dto::{ChargeResponseDto, CreateChargeDto, UpdateChargeDto};
