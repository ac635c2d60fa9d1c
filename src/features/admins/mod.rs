//! Admin accounts.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | POST | `/api/admins` | Create an admin account |
//! | GET | `/api/admins` | List admin accounts |
//! | GET | `/api/admins/{id}` | Get an admin account |
//! | DELETE | `/api/admins/{id}` | Delete an admin account |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::AdminService;
