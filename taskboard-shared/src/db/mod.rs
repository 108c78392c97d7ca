//! Database layer
//!
//! Connection pool construction and the embedded migration runner.

pub mod migrations;
pub mod pool;

pub use pool::{create_pool, DatabaseConfig};
