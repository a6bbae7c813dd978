//! Dashboard Service
//!
//! Statistics snapshot and the recent-activity feed. The snapshot fans out
//! its sub-aggregates concurrently; if any one of them fails the whole call
//! fails, there is no partial result.

use chrono::{DateTime, Local, NaiveTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::transaction::TransactionType;
use crate::utils::error::AppResult;

const DEFAULT_ACTIVITY_LIMIT: i64 = 10;
const MAX_ACTIVITY_LIMIT: i64 = 50;

/// Full statistics snapshot for the dashboard
///
/// Every field defaults to zero when nothing matches; none is ever null.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_customers: i64,
    pub active_customers: i64,
    pub total_balance: i64,
    pub today_transactions: i64,
    pub pending_verifications: i64,
    pub total_deposits: i64,
    pub total_withdrawals: i64,
    pub net_flow: i64,
    pub deposit_count: i64,
    pub withdrawal_count: i64,
}

/// One entry of the recent-activity feed
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub activity_type: &'static str,
    pub description: String,
    pub amount: i64,
    pub transaction_type: TransactionType,
    pub created_at: DateTime<Utc>,
}

/// Dashboard aggregation service
#[derive(Clone)]
pub struct DashboardService {
    pool: PgPool,
}

impl DashboardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Compute the dashboard snapshot with all sub-aggregates in parallel
    pub async fn statistics(&self) -> AppResult<DashboardStats> {
        let today = local_midnight_utc();

        let (
            total_customers,
            active_customers,
            total_balance,
            today_transactions,
            pending_verifications,
            deposits,
            withdrawals,
        ) = tokio::try_join!(
            self.count_customers(),
            self.count_active_verified_customers(),
            self.sum_balances(),
            self.count_transactions_since(today),
            self.count_pending_devices(),
            self.type_totals(TransactionType::Deposit),
            self.type_totals(TransactionType::Withdrawal),
        )?;

        Ok(DashboardStats {
            total_customers,
            active_customers,
            total_balance,
            today_transactions,
            pending_verifications,
            total_deposits: deposits.0,
            total_withdrawals: withdrawals.0,
            net_flow: deposits.0 - withdrawals.0,
            deposit_count: deposits.1,
            withdrawal_count: withdrawals.1,
        })
    }

    /// The N most recent transactions shaped into one-line descriptions
    pub async fn recent_activities(&self, limit: Option<i64>) -> AppResult<Vec<RecentActivity>> {
        let limit = limit
            .unwrap_or(DEFAULT_ACTIVITY_LIMIT)
            .clamp(1, MAX_ACTIVITY_LIMIT);

        let rows = sqlx::query_as::<
            _,
            (Uuid, TransactionType, i64, String, String, DateTime<Utc>),
        >(
            r#"
            SELECT t.id, t.type, t.amount, c.first_name, c.last_name, t.created_at
            FROM transactions t
            JOIN customers c ON c.id = t.customer_id
            ORDER BY t.created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, tx_type, amount, first_name, last_name, created_at)| RecentActivity {
                id,
                activity_type: "transaction",
                description: describe_transaction(tx_type, amount, &first_name, &last_name),
                amount,
                transaction_type: tx_type,
                created_at,
            })
            .collect())
    }

    async fn count_customers(&self) -> AppResult<i64> {
        Ok(
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customers")
                .fetch_one(&self.pool)
                .await?,
        )
    }

    /// Active customers that own at least one verified device
    async fn count_active_verified_customers(&self) -> AppResult<i64> {
        Ok(sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM customers c
            WHERE c.is_active
              AND EXISTS (
                  SELECT 1 FROM devices d
                  WHERE d.customer_id = c.id AND d.status = 'verified'
              )
            "#,
        )
        .fetch_one(&self.pool)
        .await?)
    }

    async fn sum_balances(&self) -> AppResult<i64> {
        Ok(sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(balance), 0)::BIGINT FROM customers",
        )
        .fetch_one(&self.pool)
        .await?)
    }

    async fn count_transactions_since(&self, since: DateTime<Utc>) -> AppResult<i64> {
        Ok(sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM transactions WHERE created_at >= $1",
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn count_pending_devices(&self) -> AppResult<i64> {
        Ok(sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM devices WHERE status = 'pending'",
        )
        .fetch_one(&self.pool)
        .await?)
    }

    /// Sum and count of completed transactions of one type
    async fn type_totals(&self, tx_type: TransactionType) -> AppResult<(i64, i64)> {
        Ok(sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT COALESCE(SUM(amount), 0)::BIGINT, COUNT(*)
            FROM transactions
            WHERE status = 'completed' AND type = $1
            "#,
        )
        .bind(tx_type)
        .fetch_one(&self.pool)
        .await?)
    }
}

/// Start of the current day in the server's local timezone, as a UTC instant
fn local_midnight_utc() -> DateTime<Utc> {
    let midnight = Local::now().date_naive().and_time(NaiveTime::MIN);
    midnight
        .and_local_timezone(Local)
        .earliest()
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc())
}

fn describe_transaction(
    tx_type: TransactionType,
    amount: i64,
    first_name: &str,
    last_name: &str,
) -> String {
    let kind = match tx_type {
        TransactionType::Deposit => "deposit",
        TransactionType::Withdrawal => "withdrawal",
    };
    format!("{} of {} RWF by {} {}", kind, amount, first_name, last_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_format() {
        assert_eq!(
            describe_transaction(TransactionType::Deposit, 5000, "John", "Mugisha"),
            "deposit of 5000 RWF by John Mugisha"
        );
        assert_eq!(
            describe_transaction(TransactionType::Withdrawal, 50, "Joanna", "Uwase"),
            "withdrawal of 50 RWF by Joanna Uwase"
        );
    }

    #[test]
    fn local_midnight_is_not_in_the_future() {
        let midnight = local_midnight_utc();
        assert!(midnight <= Utc::now());
        // No more than one full day behind, whatever the server timezone.
        assert!(Utc::now() - midnight < chrono::Duration::hours(36));
    }

    #[test]
    fn stats_default_is_all_zero() {
        let stats = DashboardStats::default();
        assert_eq!(stats.net_flow, 0);
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"netFlow\":0"));
        assert!(!json.contains("null"));
    }
}
