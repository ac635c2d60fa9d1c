//! Per-flat monthly charges: mosque contributions and service charges.
//!
//! Both share one table shape and one service, parameterised by [`ChargeKind`].
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | POST | `/api/contributions`, `/api/service-charges` | Record a charge |
//! | POST | `.../multiple` | Record many charges |
//! | GET | `.../building/{building_id}` | Charges of a building in a period range |
//! | GET | `.../flat/{flat_id}` | Charges of a flat in a period range |
//! | PUT | `.../{id}` | Update a charge |
//! | DELETE | `.../{id}` | Delete a charge |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use models::ChargeKind;
pub use services::ChargeService;
