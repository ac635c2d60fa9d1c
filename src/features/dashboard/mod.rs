//! Admin dashboard aggregates.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/api/dash/monthly-building-summary/{building_id}` | Building totals for one month |
//! | GET | `/api/dash/monthly-flat-summary/{flat_id}` | Flat records for one month |
//! | GET | `/api/dash/yearly-building-chart-data/{building_id}` | Twelve-month building charts |
//! | GET | `/api/dash/yearly-flat-chart-data/{flat_id}` | Twelve-month flat charts |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::DashboardService;
