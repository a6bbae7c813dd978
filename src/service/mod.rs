//! Service Layer
//!
//! Business logic and data access for the admin service. Each service owns a
//! pool handle and exposes request-scoped operations; no state is cached
//! between requests.

pub mod auth;
pub mod customer;
pub mod dashboard;
pub mod jwt;
pub mod transaction;

pub use auth::AuthService;
pub use customer::CustomerService;
pub use dashboard::DashboardService;
pub use jwt::JwtService;
pub use transaction::TransactionService;
