//! API route handlers
//!
//! - `auth`: registration, login, and current-user lookup
//! - `tasks`: task CRUD, the filtered list, and stats breakdowns
//! - `health`: liveness probe

pub mod auth;
pub mod health;
pub mod tasks;
