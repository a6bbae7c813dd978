//! Dashboard Handlers

use axum::{
    extract::{Query, State},
    Json,
};

use crate::api::{ApiResponse, AppState};
use crate::models::requests::RecentActivitiesQuery;
use crate::service::dashboard::{DashboardStats, RecentActivity};
use crate::utils::error::AppResult;

/// GET /api/dashboard/stats
pub async fn dashboard_stats(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<DashboardStats>>> {
    let stats = state.dashboard_service.statistics().await?;
    Ok(Json(ApiResponse::with_message(
        stats,
        "Statistics retrieved successfully",
    )))
}

/// GET /api/dashboard/recent-activities
pub async fn recent_activities(
    State(state): State<AppState>,
    Query(query): Query<RecentActivitiesQuery>,
) -> AppResult<Json<ApiResponse<Vec<RecentActivity>>>> {
    let activities = state.dashboard_service.recent_activities(query.limit).await?;
    Ok(Json(ApiResponse::with_message(
        activities,
        "Recent activities retrieved successfully",
    )))
}
