//! Finance aggregates.
//!
//! Everything here is straightforward summation: revenue is the sum of
//! payments, costs are the sums of expenses and transfers, commissions are
//! the sums accrued on completed referred orders, and net is the
//! difference. An optional date range (inclusive on both ends) restricts
//! every sum.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{db::DbPool, error::AppError};

/// Aggregated finance figures returned by `GET /api/admin/finance/stats`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct FinanceStats {
    /// Sum of all recorded payments
    pub revenue_cents: i64,

    /// Sum of all recorded expenses
    pub expenses_cents: i64,

    /// Sum of all recorded payouts to staff
    pub transfers_cents: i64,

    /// Commission accrued on completed orders that carry a referrer
    pub commissions_cents: i64,

    /// revenue − expenses − transfers
    pub net_cents: i64,

    /// Order counts keyed by lifecycle status
    pub orders: OrderCounts,
}

/// Order counts per lifecycle status.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct OrderCounts {
    pub pending: i64,
    pub in_progress: i64,
    pub completed: i64,
    pub cancelled: i64,
}

impl OrderCounts {
    /// Fold `(status, count)` rows into the fixed set of counters.
    ///
    /// Unknown statuses cannot occur (CHECK constraint) and are ignored.
    pub fn from_rows(rows: &[(String, i64)]) -> OrderCounts {
        let mut counts = OrderCounts::default();
        for (status, count) in rows {
            match status.as_str() {
                "pending" => counts.pending = *count,
                "in_progress" => counts.in_progress = *count,
                "completed" => counts.completed = *count,
                "cancelled" => counts.cancelled = *count,
                _ => {}
            }
        }
        counts
    }
}

/// Net position: what came in minus what went out.
///
/// Commissions are not subtracted here; they are settled through transfers
/// and would otherwise be counted twice.
pub fn net(revenue_cents: i64, expenses_cents: i64, transfers_cents: i64) -> i64 {
    revenue_cents - expenses_cents - transfers_cents
}

/// Compute the finance stats over an optional inclusive date range.
pub async fn stats(
    pool: &DbPool,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<FinanceStats, AppError> {
    let revenue_cents: i64 = sqlx::query_scalar(
        r#"
        SELECT COALESCE(SUM(amount_cents), 0)::BIGINT FROM payments
        WHERE ($1::date IS NULL OR paid_at::date >= $1)
          AND ($2::date IS NULL OR paid_at::date <= $2)
        "#,
    )
    .bind(from)
    .bind(to)
    .fetch_one(pool)
    .await?;

    let expenses_cents: i64 = sqlx::query_scalar(
        r#"
        SELECT COALESCE(SUM(amount_cents), 0)::BIGINT FROM expenses
        WHERE ($1::date IS NULL OR incurred_on >= $1)
          AND ($2::date IS NULL OR incurred_on <= $2)
        "#,
    )
    .bind(from)
    .bind(to)
    .fetch_one(pool)
    .await?;

    let transfers_cents: i64 = sqlx::query_scalar(
        r#"
        SELECT COALESCE(SUM(amount_cents), 0)::BIGINT FROM transfers
        WHERE ($1::date IS NULL OR transferred_at::date >= $1)
          AND ($2::date IS NULL OR transferred_at::date <= $2)
        "#,
    )
    .bind(from)
    .bind(to)
    .fetch_one(pool)
    .await?;

    // Commission accrues when a referred order completes; the completion
    // instant is the order's last update.
    let commissions_cents: i64 = sqlx::query_scalar(
        r#"
        SELECT COALESCE(SUM(commission_cents), 0)::BIGINT FROM orders
        WHERE status = 'completed' AND referrer_id IS NOT NULL
          AND ($1::date IS NULL OR updated_at::date >= $1)
          AND ($2::date IS NULL OR updated_at::date <= $2)
        "#,
    )
    .bind(from)
    .bind(to)
    .fetch_one(pool)
    .await?;

    let count_rows: Vec<(String, i64)> = sqlx::query_as(
        r#"
        SELECT status, COUNT(*) FROM orders
        WHERE ($1::date IS NULL OR created_at::date >= $1)
          AND ($2::date IS NULL OR created_at::date <= $2)
        GROUP BY status
        "#,
    )
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(FinanceStats {
        revenue_cents,
        expenses_cents,
        transfers_cents,
        commissions_cents,
        net_cents: net(revenue_cents, expenses_cents, transfers_cents),
        orders: OrderCounts::from_rows(&count_rows),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn net_subtracts_both_outflows() {
        assert_eq!(net(100_000, 30_000, 20_000), 50_000);
        assert_eq!(net(0, 30_000, 20_000), -50_000);
        assert_eq!(net(0, 0, 0), 0);
    }

    #[test]
    fn order_counts_fold_from_rows() {
        let rows = vec![
            ("pending".to_string(), 3),
            ("completed".to_string(), 7),
            ("cancelled".to_string(), 1),
        ];
        let counts = OrderCounts::from_rows(&rows);
        assert_eq!(
            counts,
            OrderCounts {
                pending: 3,
                in_progress: 0,
                completed: 7,
                cancelled: 1,
            }
        );
    }

    #[test]
    fn order_counts_ignore_unknown_rows() {
        let rows = vec![("archived".to_string(), 9)];
        assert_eq!(OrderCounts::from_rows(&rows), OrderCounts::default());
    }
}
