pub mod bill_dto;

pub use bill_dto::{
    BillListQuery, BillRemainingDto, BillResponseDto, CreateBillDto, FlatBillQuery, UpdateBillDto,
};
