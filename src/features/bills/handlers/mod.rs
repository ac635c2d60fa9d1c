pub mod bill_handler;
