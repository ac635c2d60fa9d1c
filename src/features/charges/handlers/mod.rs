pub mod contribution_handler;
pub mod service_charge_handler;
