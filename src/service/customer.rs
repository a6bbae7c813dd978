//! Customer Service
//!
//! Customer listing and detail, the device-verification state machine, and
//! the active-status toggle.
//!
//! Device transitions are terminal: `pending -> verified` and
//! `pending -> rejected` are the only legal moves, and both are applied as a
//! single conditional UPDATE keyed by the device hash and the expected
//! `pending` state, so concurrent transitions cannot double-apply.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::customer::{
    CustomerDetail, CustomerListItem, CustomerRecord, Device, DeviceStatus, PendingVerification,
};
use crate::models::pagination::{Pagination, ResolvedPage};
use crate::utils::error::{AppError, AppResult};

/// Stored when a device is rejected without an operator-supplied reason
pub const DEFAULT_REJECTION_REASON: &str = "No reason provided";

const LIST_COLUMNS: &str = r#"
    c.id, c.first_name, c.last_name,
    c.first_name || ' ' || c.last_name AS full_name,
    c.email, c.phone, c.balance,
    EXISTS (
        SELECT 1 FROM devices d
        WHERE d.customer_id = c.id AND d.status = 'verified'
    ) AS has_verified_device,
    (
        SELECT COUNT(*) FROM devices d
        WHERE d.customer_id = c.id AND d.status = 'pending'
    ) AS pending_devices,
    c.is_active, c.created_at
"#;

/// Customer management service
#[derive(Clone)]
pub struct CustomerService {
    pool: PgPool,
}

impl CustomerService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Paginated customer list with optional case-insensitive search over
    /// name parts, email, and phone
    ///
    /// The page slice and the total count are two separate reads; the count
    /// can lag behind concurrent writes, which is accepted for list views.
    pub async fn list(
        &self,
        page: ResolvedPage,
        search: Option<&str>,
    ) -> AppResult<(Vec<CustomerListItem>, Pagination)> {
        let pattern = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", escape_like(s)));

        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM customers c", LIST_COLUMNS));
        if let Some(pattern) = &pattern {
            push_search_filter(&mut query, pattern);
        }
        query.push(" ORDER BY c.created_at DESC");
        query.push(" LIMIT ").push_bind(page.limit);
        query.push(" OFFSET ").push_bind(page.offset());

        let customers = query
            .build_query_as::<CustomerListItem>()
            .fetch_all(&self.pool)
            .await?;

        let mut count: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM customers c");
        if let Some(pattern) = &pattern {
            push_search_filter(&mut count, pattern);
        }
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok((customers, page.pagination(total)))
    }

    /// Full customer detail including all registered devices
    pub async fn get(&self, customer_id: Uuid) -> AppResult<CustomerDetail> {
        let record =
            sqlx::query_as::<_, CustomerRecord>("SELECT * FROM customers WHERE id = $1")
                .bind(customer_id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;

        let devices = sqlx::query_as::<_, Device>(
            r#"
            SELECT id, device_id, device_id_hash, status, verified_by,
                   verified_at, rejection_reason, last_login_at, created_at
            FROM devices
            WHERE customer_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(CustomerDetail::from_record(record, devices))
    }

    /// Customers with at least one pending device, newest customer first,
    /// each paired with only their pending devices
    pub async fn pending_verifications(&self) -> AppResult<Vec<PendingVerification>> {
        let rows = sqlx::query_as::<_, PendingRow>(
            r#"
            SELECT c.id AS customer_id, c.first_name, c.last_name, c.email,
                   c.phone, c.created_at AS customer_created_at,
                   d.id AS device_pk, d.device_id, d.device_id_hash, d.status,
                   d.verified_by, d.verified_at, d.rejection_reason,
                   d.last_login_at, d.created_at AS device_created_at
            FROM customers c
            JOIN devices d ON d.customer_id = c.id
            WHERE d.status = 'pending'
            ORDER BY c.created_at DESC, d.created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut result: Vec<PendingVerification> = Vec::new();
        for row in rows {
            let device = Device {
                id: row.device_pk,
                device_id: row.device_id,
                device_id_hash: row.device_id_hash,
                status: row.status,
                verified_by: row.verified_by,
                verified_at: row.verified_at,
                rejection_reason: row.rejection_reason,
                last_login_at: row.last_login_at,
                created_at: row.device_created_at,
            };

            match result.last_mut() {
                Some(entry) if entry.id == row.customer_id => {
                    entry.pending_devices.push(device);
                }
                _ => result.push(PendingVerification {
                    id: row.customer_id,
                    full_name: format!("{} {}", row.first_name, row.last_name),
                    first_name: row.first_name,
                    last_name: row.last_name,
                    email: row.email,
                    phone: row.phone,
                    pending_devices: vec![device],
                    created_at: row.customer_created_at,
                }),
            }
        }

        Ok(result)
    }

    /// Transition a pending device to `verified`, stamping the approving admin
    pub async fn verify_device(
        &self,
        customer_id: Uuid,
        device_id_hash: &str,
        admin_id: Uuid,
    ) -> AppResult<CustomerDetail> {
        let updated = sqlx::query(
            r#"
            UPDATE devices
            SET status = 'verified', verified_by = $1, verified_at = NOW(),
                rejection_reason = NULL
            WHERE customer_id = $2 AND device_id_hash = $3 AND status = 'pending'
            "#,
        )
        .bind(admin_id)
        .bind(customer_id)
        .bind(device_id_hash)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(self
                .transition_failure(customer_id, device_id_hash)
                .await?);
        }

        self.touch_customer(customer_id).await?;
        log::info!(
            "device {} of customer {} verified by admin {}",
            device_id_hash,
            customer_id,
            admin_id
        );
        self.get(customer_id).await
    }

    /// Transition a pending device to `rejected`, recording the reason
    pub async fn reject_device(
        &self,
        customer_id: Uuid,
        device_id_hash: &str,
        admin_id: Uuid,
        reason: Option<&str>,
    ) -> AppResult<CustomerDetail> {
        let reason = reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_REJECTION_REASON);

        let updated = sqlx::query(
            r#"
            UPDATE devices
            SET status = 'rejected', verified_by = $1, verified_at = NOW(),
                rejection_reason = $2
            WHERE customer_id = $3 AND device_id_hash = $4 AND status = 'pending'
            "#,
        )
        .bind(admin_id)
        .bind(reason)
        .bind(customer_id)
        .bind(device_id_hash)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(self
                .transition_failure(customer_id, device_id_hash)
                .await?);
        }

        self.touch_customer(customer_id).await?;
        log::info!(
            "device {} of customer {} rejected by admin {}",
            device_id_hash,
            customer_id,
            admin_id
        );
        self.get(customer_id).await
    }

    /// Flip a customer's active flag
    pub async fn toggle_status(&self, customer_id: Uuid) -> AppResult<CustomerDetail> {
        let updated = sqlx::query(
            "UPDATE customers SET is_active = NOT is_active, updated_at = NOW() WHERE id = $1",
        )
        .bind(customer_id)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound("Customer not found".to_string()));
        }

        self.get(customer_id).await
    }

    /// Explain why a conditional device update matched no rows
    async fn transition_failure(
        &self,
        customer_id: Uuid,
        device_id_hash: &str,
    ) -> AppResult<AppError> {
        let status = sqlx::query_scalar::<_, DeviceStatus>(
            "SELECT status FROM devices WHERE customer_id = $1 AND device_id_hash = $2",
        )
        .bind(customer_id)
        .bind(device_id_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(match status {
            Some(DeviceStatus::Verified) => {
                AppError::Conflict("Device is already verified".to_string())
            }
            Some(DeviceStatus::Rejected) => {
                AppError::Conflict("Device has already been rejected".to_string())
            }
            // The conditional UPDATE can only miss a pending row if it raced
            // another transition that has since committed.
            Some(DeviceStatus::Pending) => {
                AppError::Conflict("Device verification is already in progress".to_string())
            }
            None => {
                let customer_exists =
                    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customers WHERE id = $1")
                        .bind(customer_id)
                        .fetch_one(&self.pool)
                        .await?;
                if customer_exists == 0 {
                    AppError::NotFound("Customer not found".to_string())
                } else {
                    AppError::NotFound("Device not found".to_string())
                }
            }
        })
    }

    async fn touch_customer(&self, customer_id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE customers SET updated_at = NOW() WHERE id = $1")
            .bind(customer_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// Escape ILIKE metacharacters so the search term matches literally
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn push_search_filter(query: &mut QueryBuilder<Postgres>, pattern: &str) {
    query
        .push(" WHERE (c.first_name ILIKE ")
        .push_bind(pattern.to_string())
        .push(" OR c.last_name ILIKE ")
        .push_bind(pattern.to_string())
        .push(" OR c.email ILIKE ")
        .push_bind(pattern.to_string())
        .push(" OR c.phone ILIKE ")
        .push_bind(pattern.to_string())
        .push(")");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(escape_like("jo"), "jo");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
    }
}

#[derive(sqlx::FromRow)]
struct PendingRow {
    customer_id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    customer_created_at: DateTime<Utc>,
    device_pk: Uuid,
    device_id: String,
    device_id_hash: String,
    status: DeviceStatus,
    verified_by: Option<Uuid>,
    verified_at: Option<DateTime<Utc>>,
    rejection_reason: Option<String>,
    last_login_at: Option<DateTime<Utc>>,
    device_created_at: DateTime<Utc>,
}
