//! Order model, status lifecycle, and API types.
//!
//! An order is a customer purchase of an academic service. It moves through
//! a simple status lifecycle:
//!
//! ```text
//! pending -> in_progress -> completed
//!    |            |
//!    +------------+-------> cancelled
//! ```
//!
//! `completed` and `cancelled` are terminal: once an order reaches either,
//! staff cannot move it again. The service price is snapshotted onto the
//! order at creation, and if the ordering customer was referred, the
//! referrer and their commission are recorded on the order as well.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::payment::PaymentStatus;

/// Lifecycle state of an order, stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Parse a status from its database representation.
    pub fn parse(s: &str) -> Option<OrderStatus> {
        match s {
            "pending" => Some(OrderStatus::Pending),
            "in_progress" => Some(OrderStatus::InProgress),
            "completed" => Some(OrderStatus::Completed),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

    /// Database / JSON representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Terminal states cannot be left.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Whether staff may move an order from `self` to `next`.
    ///
    /// Any non-terminal state may advance or be cancelled; terminal states
    /// reject every transition, including no-op re-assignment of the same
    /// status.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        !self.is_terminal() && *self != next
    }
}

/// Represents an order record from the database.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Order {
    pub id: Uuid,

    /// Customer who placed the order
    pub customer_id: Uuid,

    /// Service that was ordered
    pub service_id: Uuid,

    /// Staff member working the order, if assigned
    pub assigned_to: Option<Uuid>,

    pub title: String,
    pub details: Option<String>,

    /// Price in cents, snapshotted from the service at creation
    pub price_cents: i64,

    /// Stored as lowercase text, parsed into [`OrderStatus`] at use sites
    pub status: String,

    pub due_date: Option<NaiveDate>,

    /// Referrer of the ordering customer at creation time, if any
    pub referrer_id: Option<Uuid>,

    /// Commission owed to the referrer once the order completes
    pub commission_cents: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for `POST /api/orders`.
///
/// ```json
/// {
///   "service_id": "550e8400-e29b-41d4-a716-446655440000",
///   "title": "Sociology essay on urbanization",
///   "details": "2000 words, Harvard referencing",
///   "due_date": "2026-02-14"
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub service_id: Uuid,
    pub title: String,

    #[serde(default)]
    pub details: Option<String>,

    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

/// Request body for `PUT /api/admin/orders/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// Request body for `PUT /api/admin/orders/{id}/assign`.
#[derive(Debug, Deserialize)]
pub struct AssignOrderRequest {
    /// Staff user to hand the order to
    pub assigned_to: Uuid,
}

/// Response body for order endpoints.
///
/// Carries the derived payment fields next to the stored columns:
/// `paid_cents` is the sum of recorded payments and `payment_status` is
/// derived from it (see [`PaymentStatus::derive`]).
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub service_id: Uuid,
    pub assigned_to: Option<Uuid>,
    pub title: String,
    pub details: Option<String>,
    pub price_cents: i64,
    pub status: String,
    pub due_date: Option<NaiveDate>,
    pub paid_cents: i64,
    pub payment_status: &'static str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderResponse {
    /// Combine a stored order with its summed payments.
    pub fn from_parts(order: Order, paid_cents: i64) -> Self {
        let payment_status = PaymentStatus::derive(order.price_cents, paid_cents).as_str();
        Self {
            id: order.id,
            customer_id: order.customer_id,
            service_id: order.service_id,
            assigned_to: order.assigned_to,
            title: order.title,
            details: order.details,
            price_cents: order.price_cents,
            status: order.status,
            due_date: order.due_date,
            paid_cents,
            payment_status,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

/// Response body for single-order endpoints: the order plus its payment
/// history.
#[derive(Debug, Serialize)]
pub struct OrderDetailResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub payments: Vec<crate::models::payment::Payment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_text() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::InProgress,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::parse("done"), None);
    }

    #[test]
    fn terminal_states_reject_all_transitions() {
        for terminal in [OrderStatus::Completed, OrderStatus::Cancelled] {
            for next in [
                OrderStatus::Pending,
                OrderStatus::InProgress,
                OrderStatus::Completed,
                OrderStatus::Cancelled,
            ] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn open_states_may_advance_or_cancel() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::InProgress));
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::InProgress.can_transition_to(OrderStatus::Completed));
        // no-op transitions are rejected
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Pending));
    }
}
