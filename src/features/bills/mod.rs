//! Monthly flat bills and their payments.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | POST | `/api/bills` | Create a bill |
//! | POST | `/api/bills/upload` | Create many bills |
//! | GET | `/api/bills` | List bills, paginated or `all=true` |
//! | GET | `/api/bills/flat/{flat_id}` | Bills of a flat, optionally unpaid only |
//! | GET | `/api/bills/flat/remaining/{flat_id}` | Outstanding total of a flat |
//! | PUT | `/api/bills/{id}` | Update a bill |
//! | DELETE | `/api/bills/{id}` | Delete a bill |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::BillService;
