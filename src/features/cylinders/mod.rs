//! Building-level gas cylinder logs.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | POST | `/api/cylinder-pls` | Record a purchase |
//! | GET | `/api/cylinder-pls/building/{building_id}` | Purchases in a period range |
//! | PUT | `/api/cylinder-pls/{id}` | Update a purchase |
//! | DELETE | `/api/cylinder-pls/{id}` | Delete a purchase |
//! | POST | `/api/cylinder-uls` | Record usage |
//! | GET | `/api/cylinder-uls/building/{building_id}` | Usage in a period range |
//! | PUT | `/api/cylinder-uls/{id}` | Update usage |
//! | DELETE | `/api/cylinder-uls/{id}` | Delete usage |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{PurchaseLogService, UsageLogService};
