//! Transaction Service
//!
//! Read-only queries over the append-only transaction ledger: filtered
//! paginated lists, per-customer history, and per-type aggregates.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::pagination::{Pagination, ResolvedPage};
use crate::models::requests::{parse_end_date, parse_start_date, TransactionListQuery};
use crate::models::transaction::{
    TransactionDetail, TransactionListItem, TransactionStats, TransactionType, TypeTotals,
};
use crate::utils::error::{AppError, AppResult};

const LIST_SELECT: &str = r#"
    SELECT t.id, t.customer_id,
           c.first_name || ' ' || c.last_name AS customer_name,
           t.type, t.amount, t.status, t.reference, t.created_at
    FROM transactions t
    JOIN customers c ON c.id = t.customer_id
"#;

/// Resolved transaction filters shared by the page and count queries
#[derive(Debug, Default)]
struct Filters {
    tx_type: Option<TransactionType>,
    status: Option<crate::models::transaction::TransactionStatus>,
    customer_id: Option<Uuid>,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
}

impl Filters {
    fn from_query(query: &TransactionListQuery) -> AppResult<Self> {
        let from = query
            .start_date
            .as_deref()
            .map(parse_start_date)
            .transpose()?;
        let to = query.end_date.as_deref().map(parse_end_date).transpose()?;

        Ok(Self {
            tx_type: query.tx_type,
            status: query.status,
            customer_id: query.user_id,
            from,
            to,
        })
    }

    /// Append the WHERE clause; an absent filter adds no constraint
    fn push(&self, query: &mut QueryBuilder<Postgres>) {
        query.push(" WHERE TRUE");
        if let Some(tx_type) = self.tx_type {
            query.push(" AND t.type = ").push_bind(tx_type);
        }
        if let Some(status) = self.status {
            query.push(" AND t.status = ").push_bind(status);
        }
        if let Some(customer_id) = self.customer_id {
            query.push(" AND t.customer_id = ").push_bind(customer_id);
        }
        if let Some(from) = self.from {
            query.push(" AND t.created_at >= ").push_bind(from);
        }
        if let Some(to) = self.to {
            query.push(" AND t.created_at <= ").push_bind(to);
        }
    }
}

/// Transaction query service
#[derive(Clone)]
pub struct TransactionService {
    pool: PgPool,
}

impl TransactionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Filtered, paginated transaction list, newest first
    pub async fn list(
        &self,
        query: &TransactionListQuery,
    ) -> AppResult<(Vec<TransactionListItem>, Pagination)> {
        let page = query.page_params().resolve();
        let filters = Filters::from_query(query)?;

        let mut list: QueryBuilder<Postgres> = QueryBuilder::new(LIST_SELECT);
        filters.push(&mut list);
        list.push(" ORDER BY t.created_at DESC");
        list.push(" LIMIT ").push_bind(page.limit);
        list.push(" OFFSET ").push_bind(page.offset());

        let transactions = list
            .build_query_as::<TransactionListItem>()
            .fetch_all(&self.pool)
            .await?;

        let mut count: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM transactions t");
        filters.push(&mut count);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok((transactions, page.pagination(total)))
    }

    /// Single transaction with the owning customer's name and email
    pub async fn get(&self, transaction_id: Uuid) -> AppResult<TransactionDetail> {
        sqlx::query_as::<_, TransactionDetail>(
            r#"
            SELECT t.id, t.customer_id,
                   c.first_name || ' ' || c.last_name AS customer_name,
                   c.email AS customer_email,
                   t.type, t.amount, t.balance_before, t.balance_after,
                   t.status, t.description, t.reference, t.created_at, t.updated_at
            FROM transactions t
            JOIN customers c ON c.id = t.customer_id
            WHERE t.id = $1
            "#,
        )
        .bind(transaction_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Transaction not found".to_string()))
    }

    /// Paginated history for one customer; NotFound when the customer is absent
    pub async fn list_for_customer(
        &self,
        customer_id: Uuid,
        page: ResolvedPage,
    ) -> AppResult<(Vec<TransactionListItem>, Pagination)> {
        let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customers WHERE id = $1")
            .bind(customer_id)
            .fetch_one(&self.pool)
            .await?;
        if exists == 0 {
            return Err(AppError::NotFound("Customer not found".to_string()));
        }

        let query = TransactionListQuery {
            page: Some(page.page),
            limit: Some(page.limit),
            user_id: Some(customer_id),
            ..Default::default()
        };
        self.list(&query).await
    }

    /// Per-type sum and count of completed transactions, zero-defaulted,
    /// optionally bounded by an inclusive date range
    pub async fn statistics(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> AppResult<TransactionStats> {
        let from = start_date.map(parse_start_date).transpose()?;
        let to = end_date.map(parse_end_date).transpose()?;

        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(
            r#"
            SELECT type, COALESCE(SUM(amount), 0)::BIGINT AS total, COUNT(*) AS count
            FROM transactions
            WHERE status = 'completed'
            "#,
        );
        if let Some(from) = from {
            query.push(" AND created_at >= ").push_bind(from);
        }
        if let Some(to) = to {
            query.push(" AND created_at <= ").push_bind(to);
        }
        query.push(" GROUP BY type");

        let rows = query
            .build_query_as::<(TransactionType, i64, i64)>()
            .fetch_all(&self.pool)
            .await?;

        Ok(fold_type_totals(rows))
    }
}

/// Fold grouped per-type rows into the stats shape; types with no rows stay
/// at zero
fn fold_type_totals(rows: Vec<(TransactionType, i64, i64)>) -> TransactionStats {
    let mut stats = TransactionStats::default();
    for (tx_type, total, count) in rows {
        let slot = match tx_type {
            TransactionType::Deposit => &mut stats.deposits,
            TransactionType::Withdrawal => &mut stats.withdrawals,
        };
        *slot = TypeTotals { total, count };
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_defaults_missing_types_to_zero() {
        let stats = fold_type_totals(vec![(TransactionType::Deposit, 600, 3)]);
        assert_eq!(stats.deposits, TypeTotals { total: 600, count: 3 });
        assert_eq!(stats.withdrawals, TypeTotals::default());
    }

    #[test]
    fn fold_empty_input_is_all_zero() {
        let stats = fold_type_totals(vec![]);
        assert_eq!(stats, TransactionStats::default());
    }

    #[test]
    fn fold_keeps_both_types() {
        let stats = fold_type_totals(vec![
            (TransactionType::Withdrawal, 50, 1),
            (TransactionType::Deposit, 600, 3),
        ]);
        assert_eq!(stats.deposits.total - stats.withdrawals.total, 550);
    }

    #[test]
    fn filters_reject_malformed_dates() {
        let query = TransactionListQuery {
            start_date: Some("not-a-date".to_string()),
            ..Default::default()
        };
        assert!(Filters::from_query(&query).is_err());
    }
}
