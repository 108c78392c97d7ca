//! Database models
//!
//! Each model owns its table schema and the sqlx queries that touch it.

pub mod task;
pub mod user;

pub use task::{CreateTask, Priority, Task, UpdateTask};
pub use user::{CreateUser, User, UserSummary};
