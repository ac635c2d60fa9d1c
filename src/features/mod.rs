pub mod admins;
pub mod auth;
pub mod bills;
pub mod buildings;
pub mod charges;
pub mod cylinders;
pub mod dashboard;
pub mod flats;
pub mod gas_usages;
pub mod residents;
