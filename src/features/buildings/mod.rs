//! Buildings.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | POST | `/api/buildings` | Create a building |
//! | GET | `/api/buildings` | List buildings |
//! | GET | `/api/buildings/{id}` | Get a building |
//! | PUT | `/api/buildings/{id}` | Update a building |
//! | DELETE | `/api/buildings/{id}` | Delete a building without flats |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::BuildingService;
