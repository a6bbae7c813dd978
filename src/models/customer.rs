//! Customer and Device Models
//!
//! Customers own an ordered collection of devices. A device is pending until
//! an administrator verifies or rejects it; both outcomes are terminal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Verification state of a registered device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "device_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Pending,
    Verified,
    Rejected,
}

/// Device registered by a customer, addressed by its unique hash
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: Uuid,
    pub device_id: String,
    pub device_id_hash: String,
    pub status: DeviceStatus,
    pub verified_by: Option<Uuid>,
    pub verified_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Internal customer row including the password hash
///
/// Never exposed in API responses; convert to [`CustomerDetail`] first.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CustomerRecord {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub balance: i64,
    pub low_balance_threshold: i64,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full customer view for detail endpoints, devices included
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetail {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub balance: i64,
    pub low_balance_threshold: i64,
    pub devices: Vec<Device>,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CustomerDetail {
    pub fn from_record(record: CustomerRecord, devices: Vec<Device>) -> Self {
        let full_name = format!("{} {}", record.first_name, record.last_name);
        CustomerDetail {
            id: record.id,
            first_name: record.first_name,
            last_name: record.last_name,
            full_name,
            email: record.email,
            phone: record.phone,
            balance: record.balance,
            low_balance_threshold: record.low_balance_threshold,
            devices,
            is_active: record.is_active,
            last_login_at: record.last_login_at,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Reduced customer view for list endpoints
///
/// `full_name`, `has_verified_device`, and `pending_devices` are computed in
/// the list query itself.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CustomerListItem {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub balance: i64,
    pub has_verified_device: bool,
    pub pending_devices: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Customer paired with only their pending devices, for the review queue
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingVerification {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub pending_devices: Vec<Device>,
    pub created_at: DateTime<Utc>,
}
