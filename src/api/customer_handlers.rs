//! Customer Handlers
//!
//! Customer listing, detail, device verification decisions, and the
//! active-status toggle.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::authorize_roles;
use crate::api::{ApiResponse, AppState, AuthAdmin};
use crate::models::customer::{CustomerDetail, PendingVerification};
use crate::models::requests::{
    CustomerListQuery, CustomerListResponse, RejectDeviceRequest, VerifyDeviceRequest,
};
use crate::utils::error::AppResult;

/// Roles allowed to change customer or device state
const WRITE_ROLES: &[&str] = &["super_admin", "admin"];

/// GET /api/customers
pub async fn list_customers(
    State(state): State<AppState>,
    Query(query): Query<CustomerListQuery>,
) -> AppResult<Json<ApiResponse<CustomerListResponse>>> {
    let page = query.page_params().resolve();
    let (customers, pagination) = state
        .customer_service
        .list(page, query.search.as_deref())
        .await?;

    Ok(Json(ApiResponse::with_message(
        CustomerListResponse {
            customers,
            pagination,
        },
        "Customers retrieved successfully",
    )))
}

/// GET /api/customers/{id}
pub async fn get_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CustomerDetail>>> {
    let customer = state.customer_service.get(customer_id).await?;
    Ok(Json(ApiResponse::with_message(
        customer,
        "Customer retrieved successfully",
    )))
}

/// GET /api/customers/pending-verifications
pub async fn pending_verifications(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<PendingVerification>>>> {
    let customers = state.customer_service.pending_verifications().await?;
    Ok(Json(ApiResponse::with_message(
        customers,
        "Pending verifications retrieved successfully",
    )))
}

/// POST /api/customers/{id}/verify-device
pub async fn verify_device(
    State(state): State<AppState>,
    Extension(AuthAdmin(admin)): Extension<AuthAdmin>,
    Path(customer_id): Path<Uuid>,
    Json(request): Json<VerifyDeviceRequest>,
) -> AppResult<Json<ApiResponse<CustomerDetail>>> {
    authorize_roles(&admin, WRITE_ROLES)?;
    request.validate()?;

    let customer = state
        .customer_service
        .verify_device(customer_id, &request.device_id_hash, admin.id)
        .await?;

    Ok(Json(ApiResponse::with_message(
        customer,
        "Device verified successfully",
    )))
}

/// POST /api/customers/{id}/reject-device
pub async fn reject_device(
    State(state): State<AppState>,
    Extension(AuthAdmin(admin)): Extension<AuthAdmin>,
    Path(customer_id): Path<Uuid>,
    Json(request): Json<RejectDeviceRequest>,
) -> AppResult<Json<ApiResponse<CustomerDetail>>> {
    authorize_roles(&admin, WRITE_ROLES)?;
    request.validate()?;

    let customer = state
        .customer_service
        .reject_device(
            customer_id,
            &request.device_id_hash,
            admin.id,
            request.reason.as_deref(),
        )
        .await?;

    Ok(Json(ApiResponse::with_message(
        customer,
        "Device rejected successfully",
    )))
}

/// PATCH /api/customers/{id}/toggle-status
pub async fn toggle_status(
    State(state): State<AppState>,
    Extension(AuthAdmin(admin)): Extension<AuthAdmin>,
    Path(customer_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CustomerDetail>>> {
    authorize_roles(&admin, WRITE_ROLES)?;

    let customer = state.customer_service.toggle_status(customer_id).await?;
    let message = if customer.is_active {
        "Customer activated successfully"
    } else {
        "Customer deactivated successfully"
    };

    Ok(Json(ApiResponse::with_message(customer, message)))
}
