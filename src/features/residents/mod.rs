//! Resident self-service. Every route reads the flat from the session, so a
//! resident can only ever see their own flat.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/api/me/monthly-summary` | Monthly summary of the flat |
//! | GET | `/api/me/yearly-chart-data` | Twelve-month gas charts |
//! | GET | `/api/me/bills` | Bills, optionally unpaid only |
//! | GET | `/api/me/bills/remaining` | Outstanding bill total |
//! | GET | `/api/me/gas-usages` | Gas records in a period range |
//! | GET | `/api/me/contributions` | Contributions in a period range |
//! | GET | `/api/me/service-charges` | Service charges in a period range |

pub mod handlers;
pub mod routes;
pub mod state;

pub use state::ResidentServices;
