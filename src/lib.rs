//! Savings Admin Service Library
//!
//! Administrative back office for a mobile savings platform: an HTTP API for
//! staff to manage customers, review device-verification requests, inspect
//! transaction history, and read dashboard statistics.
//!
//! # Architecture
//!
//! A request passes through security middleware (CORS, rate limiting, bearer
//! auth), the router, payload validation, then a handler that calls one of
//! the services; services query PostgreSQL through a shared connection pool
//! and the response is shaped into the uniform `{success, message, data}`
//! envelope. No state is cached between requests.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use savings_admin::{
//!     api::{create_router, AppState},
//!     config::AppConfig,
//!     database,
//!     service::{
//!         AuthService, CustomerService, DashboardService, JwtService, TransactionService,
//!     },
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::from_env();
//!     let pool = database::create_pool(&config.database).await?;
//!
//!     let jwt_service = JwtService::new(config.jwt.secret.clone(), config.jwt.expires_hours);
//!     let state = AppState {
//!         auth_service: Arc::new(AuthService::new(pool.clone(), jwt_service.clone())),
//!         customer_service: Arc::new(CustomerService::new(pool.clone())),
//!         transaction_service: Arc::new(TransactionService::new(pool.clone())),
//!         dashboard_service: Arc::new(DashboardService::new(pool.clone())),
//!         jwt_service: Arc::new(jwt_service),
//!     };
//!
//!     let app = create_router(state);
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

/// HTTP API layer with handlers, middleware, and routing
pub mod api;

/// Configuration management for all service settings
pub mod config;

/// Database connection management
pub mod database;

/// Data models and request/response structures
pub mod models;

/// Business logic and data access services
pub mod service;

/// Shared utilities for security, validation, and error handling
pub mod utils;

// Re-export commonly used types for convenient access
pub use api::{create_router, ApiResponse, AppState, RateLimiter};
pub use config::AppConfig;
pub use database::{create_pool, DatabasePool};
pub use models::{
    AdminContext, AdminProfile, CustomerDetail, CustomerListItem, Device, DeviceStatus,
    PageParams, Pagination, Transaction, TransactionStats, TransactionStatus, TransactionType,
};
pub use service::{
    AuthService, CustomerService, DashboardService, JwtService, TransactionService,
};
pub use utils::error::{AppError, AppResult, ErrorResponse};

/// Library version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
