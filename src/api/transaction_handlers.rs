//! Transaction Handlers
//!
//! Filtered listing, detail, per-customer history, and type aggregates.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::api::{ApiResponse, AppState};
use crate::models::pagination::PageParams;
use crate::models::requests::{DateRangeQuery, TransactionListQuery, TransactionListResponse};
use crate::models::transaction::{TransactionDetail, TransactionStats};
use crate::utils::error::AppResult;

/// GET /api/transactions
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<TransactionListQuery>,
) -> AppResult<Json<ApiResponse<TransactionListResponse>>> {
    let (transactions, pagination) = state.transaction_service.list(&query).await?;

    Ok(Json(ApiResponse::with_message(
        TransactionListResponse {
            transactions,
            pagination,
        },
        "Transactions retrieved successfully",
    )))
}

/// GET /api/transactions/{id}
pub async fn get_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<TransactionDetail>>> {
    let transaction = state.transaction_service.get(transaction_id).await?;
    Ok(Json(ApiResponse::with_message(
        transaction,
        "Transaction retrieved successfully",
    )))
}

/// GET /api/transactions/user/{userId}
pub async fn transactions_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<ApiResponse<TransactionListResponse>>> {
    let (transactions, pagination) = state
        .transaction_service
        .list_for_customer(user_id, page.resolve())
        .await?;

    Ok(Json(ApiResponse::with_message(
        TransactionListResponse {
            transactions,
            pagination,
        },
        "User transactions retrieved successfully",
    )))
}

/// GET /api/transactions/stats
pub async fn transaction_stats(
    State(state): State<AppState>,
    Query(range): Query<DateRangeQuery>,
) -> AppResult<Json<ApiResponse<TransactionStats>>> {
    let stats = state
        .transaction_service
        .statistics(range.start_date.as_deref(), range.end_date.as_deref())
        .await?;

    Ok(Json(ApiResponse::with_message(
        stats,
        "Transaction statistics retrieved successfully",
    )))
}
