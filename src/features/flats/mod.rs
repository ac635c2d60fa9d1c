//! Flats and their owner/renter contacts.
//!
//! A flat is also the identity record a resident signs in with.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | POST | `/api/flats` | Create a flat |
//! | GET | `/api/flats` | List all flats |
//! | GET | `/api/flats/building/{building_id}` | List the flats of a building |
//! | GET | `/api/flats/{id}` | Get a flat |
//! | PUT | `/api/flats/{id}` | Update contacts and occupancy |
//! | DELETE | `/api/flats/{id}` | Delete a flat and its records |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::FlatService;
