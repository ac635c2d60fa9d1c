pub mod charge;

pub use charge::{Charge, ChargeKind};
