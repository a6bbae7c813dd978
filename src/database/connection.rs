//! Database Connection Management
//!
//! Pool construction from the typed database settings. The pool is built once
//! at startup and passed by handle into every service; request-handling code
//! never touches ambient globals.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

use crate::config::DatabaseSettings;

/// Database connection pool type alias for convenience
pub type DatabasePool = PgPool;

/// Create a connection pool from the given settings
pub async fn create_pool(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.connect_timeout_seconds))
        .idle_timeout(Duration::from_secs(settings.idle_timeout_seconds))
        .connect(&settings.url)
        .await
}
