//! Payment record model and the derived payment status.
//!
//! Payments are append-only records against an order. An order's payment
//! status is never stored; it is derived on read by summing the order's
//! payments and comparing the total to the snapshotted price.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Derived payment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Unpaid,
    Partial,
    Paid,
}

impl PaymentStatus {
    /// Derive the payment status from the order price and the sum of its
    /// recorded payments.
    ///
    /// - nothing paid -> `Unpaid`
    /// - something paid but less than the price -> `Partial`
    /// - paid in full (or a free order) -> `Paid`
    pub fn derive(price_cents: i64, paid_cents: i64) -> PaymentStatus {
        if paid_cents >= price_cents {
            PaymentStatus::Paid
        } else if paid_cents > 0 {
            PaymentStatus::Partial
        } else {
            PaymentStatus::Unpaid
        }
    }

    /// JSON representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Partial => "partial",
            PaymentStatus::Paid => "paid",
        }
    }
}

/// Represents a payment record from the database.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Payment {
    pub id: Uuid,

    /// Order this payment settles (partially or fully)
    pub order_id: Uuid,

    /// Amount in cents, always positive
    pub amount_cents: i64,

    /// Free-form method label ("bank_transfer", "cash", "mobile_money")
    pub method: String,

    /// External reference (bank slip number, transaction id), if any
    pub reference: Option<String>,

    /// Staff member who recorded this payment
    pub recorded_by: Uuid,

    /// When the money actually arrived (may predate the record)
    pub paid_at: DateTime<Utc>,

    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /api/admin/orders/{id}/payments`.
///
/// ```json
/// {
///   "amount_cents": 2500,
///   "method": "bank_transfer",
///   "reference": "SLIP-0042",
///   "paid_at": "2026-01-12T09:30:00Z"
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct RecordPaymentRequest {
    pub amount_cents: i64,
    pub method: String,

    #[serde(default)]
    pub reference: Option<String>,

    /// Defaults to now when omitted
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_unpaid_when_nothing_recorded() {
        assert_eq!(PaymentStatus::derive(5000, 0), PaymentStatus::Unpaid);
    }

    #[test]
    fn derives_partial_below_price() {
        assert_eq!(PaymentStatus::derive(5000, 1), PaymentStatus::Partial);
        assert_eq!(PaymentStatus::derive(5000, 4999), PaymentStatus::Partial);
    }

    #[test]
    fn derives_paid_at_or_above_price() {
        assert_eq!(PaymentStatus::derive(5000, 5000), PaymentStatus::Paid);
        assert_eq!(PaymentStatus::derive(5000, 6000), PaymentStatus::Paid);
    }

    #[test]
    fn free_orders_count_as_paid() {
        assert_eq!(PaymentStatus::derive(0, 0), PaymentStatus::Paid);
    }
}
