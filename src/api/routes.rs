//! API Route Definitions
//!
//! Route table for the admin service. Everything lives under `/api`; the
//! health check and login are public, all other routes sit behind the
//! bearer-token auth middleware.

use axum::{
    middleware::from_fn_with_state,
    routing::{get, patch, post},
    Router,
};

use super::auth_handlers::{health_check, login, profile};
use super::customer_handlers::{
    get_customer, list_customers, pending_verifications, reject_device, toggle_status,
    verify_device,
};
use super::dashboard_handlers::{dashboard_stats, recent_activities};
use super::middleware::require_auth;
use super::transaction_handlers::{
    get_transaction, list_transactions, transaction_stats, transactions_for_user,
};
use super::AppState;

/// Build the full application router
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/auth/profile", get(profile))
        .nest("/customers", customer_routes())
        .nest("/transactions", transaction_routes())
        .nest("/dashboard", dashboard_routes())
        .layer(from_fn_with_state(state.clone(), require_auth));

    let api = Router::new()
        .route("/health", get(health_check))
        .route("/auth/login", post(login))
        .merge(protected);

    Router::new().nest("/api", api).with_state(state)
}

fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customers))
        .route("/pending-verifications", get(pending_verifications))
        .route("/{id}", get(get_customer))
        .route("/{id}/verify-device", post(verify_device))
        .route("/{id}/reject-device", post(reject_device))
        .route("/{id}/toggle-status", patch(toggle_status))
}

fn transaction_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_transactions))
        .route("/stats", get(transaction_stats))
        .route("/user/{userId}", get(transactions_for_user))
        .route("/{id}", get(get_transaction))
}

fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(dashboard_stats))
        .route("/recent-activities", get(recent_activities))
}
