//! Request and Response Models
//!
//! Payloads and query parameters for the API endpoints, with validation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::customer::CustomerListItem;
use crate::models::pagination::{PageParams, Pagination};
use crate::models::transaction::{TransactionListItem, TransactionStatus, TransactionType};
use crate::utils::error::{AppError, AppResult};
use crate::utils::validation::{device_hash_validator, email_validator};

/// Request payload for admin login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(custom(function = "email_validator"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

/// Request payload for verifying a customer device
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyDeviceRequest {
    #[validate(custom(function = "device_hash_validator"))]
    pub device_id_hash: String,
}

/// Request payload for rejecting a customer device
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RejectDeviceRequest {
    #[validate(custom(function = "device_hash_validator"))]
    pub device_id_hash: String,

    /// Optional free-text reason shown to the customer
    #[validate(length(max = 500, message = "Reason cannot exceed 500 characters"))]
    pub reason: Option<String>,
}

/// Query parameters for the customer list
///
/// page/limit are kept inline rather than flattened; serde_urlencoded cannot
/// deserialize numeric fields through `#[serde(flatten)]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}

impl CustomerListQuery {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            limit: self.limit,
        }
    }
}

/// Query parameters for the transaction list
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    #[serde(rename = "type")]
    pub tx_type: Option<TransactionType>,
    pub status: Option<TransactionStatus>,
    pub user_id: Option<Uuid>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl TransactionListQuery {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            limit: self.limit,
        }
    }
}

/// Query parameters for date-bounded statistics
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Query parameters for the recent-activity feed
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentActivitiesQuery {
    pub limit: Option<i64>,
}

/// Customer list page plus pagination metadata
#[derive(Debug, Serialize)]
pub struct CustomerListResponse {
    pub customers: Vec<CustomerListItem>,
    pub pagination: Pagination,
}

/// Transaction list page plus pagination metadata
#[derive(Debug, Serialize)]
pub struct TransactionListResponse {
    pub transactions: Vec<TransactionListItem>,
    pub pagination: Pagination,
}

/// Parse a range start bound, accepting RFC 3339 or a plain date
/// (interpreted as midnight UTC)
pub fn parse_start_date(value: &str) -> AppResult<DateTime<Utc>> {
    parse_date_bound(value, false)
}

/// Parse a range end bound; a plain date is widened to the end of that day
/// so the range stays inclusive
pub fn parse_end_date(value: &str) -> AppResult<DateTime<Utc>> {
    parse_date_bound(value, true)
}

fn parse_date_bound(value: &str, end_of_day: bool) -> AppResult<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        AppError::Validation(format!(
            "Invalid date '{}', expected RFC 3339 or YYYY-MM-DD",
            value
        ))
    })?;

    let time = if end_of_day {
        date.and_hms_milli_opt(23, 59, 59, 999)
    } else {
        date.and_hms_opt(0, 0, 0)
    }
    .ok_or_else(|| AppError::Validation(format!("Invalid date '{}'", value)))?;

    Ok(time.and_utc())
}
