pub mod flat_handler;
