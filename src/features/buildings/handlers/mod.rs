pub mod building_handler;
