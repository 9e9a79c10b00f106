//! Order creation and lifecycle management.
//!
//! Order creation snapshots the service price, carries the customer's
//! referrer, and computes the referral commission from the settings rate.
//! Status transitions enforce the lifecycle rules from
//! [`OrderStatus`](crate::models::order::OrderStatus) and write a
//! notification row for the customer.

use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::order::{CreateOrderRequest, Order, OrderStatus},
    models::user::Role,
};

/// Referral commission on an order: `price * rate / 100`, floored.
///
/// Widened to i128 for the intermediate product so extreme prices cannot
/// overflow. Rates outside 0..=100 are clamped by the settings CHECK
/// constraint before they ever reach this function.
pub fn commission_for(price_cents: i64, rate_percent: i32) -> i64 {
    (price_cents as i128 * rate_percent as i128 / 100) as i64
}

/// Create an order for a customer.
///
/// # Process
///
/// 1. Load the (active) service and snapshot its price
/// 2. Load the customer's referrer, if any
/// 3. If referred, compute the commission from the settings rate
/// 4. Insert the order as `pending`
///
/// # Errors
///
/// - `NotFound("service")`: service missing or inactive
/// - `InvalidRequest`: empty title
pub async fn create_order(
    pool: &DbPool,
    customer_id: Uuid,
    request: CreateOrderRequest,
) -> Result<Order, AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "title must not be empty".to_string(),
        ));
    }

    // Snapshot the price from the active service
    let price_cents: i64 =
        sqlx::query_scalar("SELECT price_cents FROM services WHERE id = $1 AND is_active = TRUE")
            .bind(request.service_id)
            .fetch_optional(pool)
            .await?
            .ok_or(AppError::NotFound("service"))?;

    // Carry the customer's referrer onto the order
    let referrer_id: Option<Uuid> =
        sqlx::query_scalar("SELECT referred_by FROM users WHERE id = $1")
            .bind(customer_id)
            .fetch_one(pool)
            .await?;

    let commission_cents = if referrer_id.is_some() {
        let rate: i32 =
            sqlx::query_scalar("SELECT commission_rate_percent FROM settings WHERE id = 1")
                .fetch_one(pool)
                .await?;
        commission_for(price_cents, rate)
    } else {
        0
    };

    let order = sqlx::query_as::<_, Order>(
        r#"
        INSERT INTO orders (
            customer_id, service_id, title, details, price_cents,
            due_date, referrer_id, commission_cents
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(customer_id)
    .bind(request.service_id)
    .bind(request.title)
    .bind(request.details)
    .bind(price_cents)
    .bind(request.due_date)
    .bind(referrer_id)
    .bind(commission_cents)
    .fetch_one(pool)
    .await?;

    tracing::info!(order_id = %order.id, customer_id = %customer_id, "order created");

    Ok(order)
}

/// Move an order to a new status and notify the customer.
///
/// Both writes happen in one database transaction.
///
/// # Errors
///
/// - `NotFound("order")`: order does not exist
/// - `Unprocessable`: transition not allowed (terminal state, or no-op)
pub async fn update_status(
    pool: &DbPool,
    order_id: Uuid,
    next: OrderStatus,
) -> Result<Order, AppError> {
    let mut tx = pool.begin().await?;

    // Lock the order row so concurrent transitions serialize
    let current: String = sqlx::query_scalar("SELECT status FROM orders WHERE id = $1 FOR UPDATE")
        .bind(order_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::NotFound("order"))?;

    let current = OrderStatus::parse(&current).ok_or(AppError::NotFound("order"))?;

    if !current.can_transition_to(next) {
        return Err(AppError::Unprocessable(format!(
            "cannot move order from {} to {}",
            current.as_str(),
            next.as_str()
        )));
    }

    let order = sqlx::query_as::<_, Order>(
        r#"
        UPDATE orders
        SET status = $1, updated_at = NOW()
        WHERE id = $2
        RETURNING *
        "#,
    )
    .bind(next.as_str())
    .bind(order_id)
    .fetch_one(&mut *tx)
    .await?;

    // Tell the customer what happened
    sqlx::query(
        r#"
        INSERT INTO notifications (user_id, title, body, kind)
        VALUES ($1, $2, $3, 'order_status')
        "#,
    )
    .bind(order.customer_id)
    .bind(format!("Order update: {}", order.title))
    .bind(format!("Your order is now {}.", next.as_str()))
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(order_id = %order_id, status = next.as_str(), "order status updated");

    Ok(order)
}

/// Assign an order to a staff member.
///
/// # Errors
///
/// - `NotFound("order")` / `NotFound("user")`
/// - `Unprocessable`: assignee is not staff, or the order is terminal
pub async fn assign(pool: &DbPool, order_id: Uuid, assignee_id: Uuid) -> Result<Order, AppError> {
    let assignee_role: String = sqlx::query_scalar("SELECT role FROM users WHERE id = $1")
        .bind(assignee_id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    let is_staff = Role::parse(&assignee_role).is_some_and(|r| r.is_staff());
    if !is_staff {
        return Err(AppError::Unprocessable(
            "orders can only be assigned to staff".to_string(),
        ));
    }

    let order = sqlx::query_as::<_, Order>(
        r#"
        UPDATE orders
        SET assigned_to = $1, updated_at = NOW()
        WHERE id = $2 AND status NOT IN ('completed', 'cancelled')
        RETURNING *
        "#,
    )
    .bind(assignee_id)
    .bind(order_id)
    .fetch_optional(pool)
    .await?;

    match order {
        Some(order) => Ok(order),
        None => {
            // Distinguish a missing order from a terminal one
            let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM orders WHERE id = $1)")
                .bind(order_id)
                .fetch_one(pool)
                .await?;
            if exists {
                Err(AppError::Unprocessable(
                    "completed or cancelled orders cannot be assigned".to_string(),
                ))
            } else {
                Err(AppError::NotFound("order"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commission_is_floored_integer_percent() {
        assert_eq!(commission_for(10_000, 10), 1_000);
        assert_eq!(commission_for(4_999, 10), 499);
        assert_eq!(commission_for(99, 10), 9);
        assert_eq!(commission_for(10_000, 0), 0);
    }

    #[test]
    fn commission_survives_extreme_prices() {
        assert_eq!(commission_for(i64::MAX, 100), i64::MAX);
        assert_eq!(commission_for(i64::MAX, 50), i64::MAX / 2);
    }
}
