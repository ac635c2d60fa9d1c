//! Admin and resident sessions.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | POST | `/api/auth/admin-sign-up` | Create the first admin account |
//! | POST | `/api/auth/admin-sign-in` | Admin sign-in with email and password |
//! | POST | `/api/auth/flat-sign-in` | Resident sign-in with flat number and phone |
//! | POST | `/api/auth/admin-sign-out` | Clear the session cookie |
//! | POST | `/api/auth/flat-sign-out` | Clear the session cookie |
//! | GET | `/api/auth/admin-auth-check` | Current admin |
//! | GET | `/api/auth/flat-auth-check` | Current resident |

pub mod cookie;
pub mod dtos;
pub mod guards;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod services;

pub use services::AuthService;
