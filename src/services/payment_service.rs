//! Payment recording and per-order payment totals.
//!
//! Payments are recorded inside a database transaction that locks the
//! order row, so two staff members recording against the same order at
//! once cannot jointly overshoot the price.

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::order::{Order, OrderResponse, OrderStatus},
    models::payment::{Payment, RecordPaymentRequest},
};

/// Record a payment against an order.
///
/// # Process
///
/// 1. Validate the amount and method
/// 2. Start a transaction and lock the order row
/// 3. Reject cancelled orders and overpayment past the outstanding balance
/// 4. Insert the payment and a customer notification
/// 5. Commit
///
/// # Errors
///
/// - `InvalidRequest`: non-positive amount or empty method
/// - `NotFound("order")`
/// - `Unprocessable`: cancelled order, or amount exceeds the outstanding
///   balance
pub async fn record_payment(
    pool: &DbPool,
    order_id: Uuid,
    recorded_by: Uuid,
    request: RecordPaymentRequest,
) -> Result<Payment, AppError> {
    if request.amount_cents <= 0 {
        return Err(AppError::InvalidRequest(
            "amount must be positive".to_string(),
        ));
    }
    if request.method.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "method must not be empty".to_string(),
        ));
    }

    let mut tx = pool.begin().await?;

    // Lock the order so concurrent recordings serialize on the balance check
    let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1 FOR UPDATE")
        .bind(order_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::NotFound("order"))?;

    if OrderStatus::parse(&order.status) == Some(OrderStatus::Cancelled) {
        return Err(AppError::Unprocessable(
            "cannot record payments on a cancelled order".to_string(),
        ));
    }

    // SUM(bigint) yields NUMERIC in Postgres; cast back for the i64 decode
    let paid_cents: i64 = sqlx::query_scalar(
        "SELECT COALESCE(SUM(amount_cents), 0)::BIGINT FROM payments WHERE order_id = $1",
    )
    .bind(order_id)
    .fetch_one(&mut *tx)
    .await?;

    let outstanding = order.price_cents - paid_cents;
    if request.amount_cents > outstanding {
        return Err(AppError::Unprocessable(format!(
            "amount exceeds outstanding balance of {} cents",
            outstanding
        )));
    }

    let payment = sqlx::query_as::<_, Payment>(
        r#"
        INSERT INTO payments (order_id, amount_cents, method, reference, recorded_by, paid_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(order_id)
    .bind(request.amount_cents)
    .bind(request.method)
    .bind(request.reference)
    .bind(recorded_by)
    .bind(request.paid_at.unwrap_or_else(Utc::now))
    .fetch_one(&mut *tx)
    .await?;

    // Tell the customer their balance moved
    sqlx::query(
        r#"
        INSERT INTO notifications (user_id, title, body, kind)
        VALUES ($1, $2, $3, 'payment')
        "#,
    )
    .bind(order.customer_id)
    .bind(format!("Payment received: {}", order.title))
    .bind(format!(
        "We recorded a payment of {} cents against your order.",
        payment.amount_cents
    ))
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(order_id = %order_id, amount_cents = payment.amount_cents, "payment recorded");

    Ok(payment)
}

/// Sum of recorded payments for one order.
pub async fn paid_total(pool: &DbPool, order_id: Uuid) -> Result<i64, AppError> {
    let total: i64 = sqlx::query_scalar(
        "SELECT COALESCE(SUM(amount_cents), 0)::BIGINT FROM payments WHERE order_id = $1",
    )
    .bind(order_id)
    .fetch_one(pool)
    .await?;

    Ok(total)
}

/// Sums of recorded payments for a batch of orders, keyed by order id.
///
/// Orders without payments are simply absent from the map.
pub async fn paid_totals(
    pool: &DbPool,
    order_ids: &[Uuid],
) -> Result<HashMap<Uuid, i64>, AppError> {
    let rows: Vec<(Uuid, i64)> = sqlx::query_as(
        r#"
        SELECT order_id, COALESCE(SUM(amount_cents), 0)::BIGINT
        FROM payments
        WHERE order_id = ANY($1)
        GROUP BY order_id
        "#,
    )
    .bind(order_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().collect())
}

/// Join a batch of orders with their payment sums into response bodies.
pub fn merge_paid(orders: Vec<Order>, totals: &HashMap<Uuid, i64>) -> Vec<OrderResponse> {
    orders
        .into_iter()
        .map(|order| {
            let paid = totals.get(&order.id).copied().unwrap_or(0);
            OrderResponse::from_parts(order, paid)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn order(id: Uuid, price_cents: i64) -> Order {
        Order {
            id,
            customer_id: Uuid::new_v4(),
            service_id: Uuid::new_v4(),
            assigned_to: None,
            title: "Essay".to_string(),
            details: None,
            price_cents,
            status: "pending".to_string(),
            due_date: None,
            referrer_id: None,
            commission_cents: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn merge_fills_missing_totals_with_zero() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let totals = HashMap::from([(a, 2_500_i64)]);

        let responses = merge_paid(vec![order(a, 5_000), order(b, 5_000)], &totals);

        assert_eq!(responses[0].paid_cents, 2_500);
        assert_eq!(responses[0].payment_status, "partial");
        assert_eq!(responses[1].paid_cents, 0);
        assert_eq!(responses[1].payment_status, "unpaid");
    }

    #[test]
    fn merge_marks_fully_paid_orders() {
        let a = Uuid::new_v4();
        let totals = HashMap::from([(a, 5_000_i64)]);

        let responses = merge_paid(vec![order(a, 5_000)], &totals);

        assert_eq!(responses[0].payment_status, "paid");
    }
}
