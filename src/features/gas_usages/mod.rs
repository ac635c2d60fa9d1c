//! Monthly gas meter readings and the bills derived from them.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | POST | `/api/gas-usages` | Record a reading |
//! | POST | `/api/gas-usages/multiple` | Record many readings |
//! | GET | `/api/gas-usages/building/{building_id}` | Readings of a building in a period range |
//! | GET | `/api/gas-usages/flat/{flat_id}` | Readings of a flat in a period range |
//! | PUT | `/api/gas-usages/{id}` | Correct a reading |
//! | DELETE | `/api/gas-usages/{id}` | Delete a reading |

pub mod dtos;
pub mod handlers;
pub mod ledger;
pub mod models;
pub mod routes;
pub mod services;

pub use services::GasUsageService;
