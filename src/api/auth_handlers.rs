//! Auth Handlers
//!
//! Login, profile, and the public health check.

use axum::{extract::State, Extension, Json};
use chrono::Utc;
use serde::Serialize;
use validator::Validate;

use crate::api::{ApiResponse, AppState, AuthAdmin};
use crate::models::admin::AdminProfile;
use crate::models::auth::LoginResponse;
use crate::models::requests::LoginRequest;
use crate::utils::error::AppResult;
use crate::VERSION;

/// Health check payload
#[derive(Debug, Serialize)]
pub struct HealthCheck {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<Utc>,
}

/// GET /api/health
pub async fn health_check() -> Json<ApiResponse<HealthCheck>> {
    Json(ApiResponse::with_message(
        HealthCheck {
            status: "ok".to_string(),
            version: VERSION.to_string(),
            timestamp: Utc::now(),
        },
        "Server is running",
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    request.validate()?;

    let response = state
        .auth_service
        .login(&request.email, &request.password)
        .await?;

    Ok(Json(ApiResponse::with_message(
        response,
        "Login successful",
    )))
}

/// GET /api/auth/profile
pub async fn profile(
    State(state): State<AppState>,
    Extension(AuthAdmin(admin)): Extension<AuthAdmin>,
) -> AppResult<Json<ApiResponse<AdminProfile>>> {
    let profile = state.auth_service.profile(admin.id).await?;
    Ok(Json(ApiResponse::with_message(
        profile,
        "Profile retrieved successfully",
    )))
}
