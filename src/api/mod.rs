//! API Layer
//!
//! HTTP endpoints, middleware, and response envelope for the admin service.

pub mod auth_handlers;
pub mod customer_handlers;
pub mod dashboard_handlers;
pub mod middleware;
pub mod routes;
pub mod transaction_handlers;

use std::sync::Arc;

use serde::Serialize;

use crate::service::{
    AuthService, CustomerService, DashboardService, JwtService, TransactionService,
};

pub use middleware::{rate_limit_middleware, require_auth, AuthAdmin, RateLimiter};
pub use routes::create_router;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub customer_service: Arc<CustomerService>,
    pub transaction_service: Arc<TransactionService>,
    pub dashboard_service: Arc<DashboardService>,
    pub jwt_service: Arc<JwtService>,
}

/// Uniform success envelope: `{success: true, message?, data?}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn with_message(data: T, message: &str) -> Self {
        Self {
            success: true,
            message: Some(message.to_string()),
            data: Some(data),
        }
    }
}
