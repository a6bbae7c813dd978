//! Database Layer
//!
//! PostgreSQL connection management with SQLx.

pub mod connection;

pub use connection::{create_pool, DatabasePool};
