//! Employee payout (transfer) model and API types.
//!
//! A transfer is a payout record from the business to a staff member:
//! salary, commission settlement, or reimbursement. Transfers only move
//! book-keeping records; actual money moves outside the system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a transfer record from the database.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Transfer {
    pub id: Uuid,

    /// Staff member who received the payout
    pub employee_id: Uuid,

    /// Amount in cents, always positive
    pub amount_cents: i64,

    pub note: Option<String>,

    /// When the payout was made (may predate the record)
    pub transferred_at: DateTime<Utc>,

    /// Admin who recorded this transfer
    pub recorded_by: Uuid,

    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /api/admin/transfers`.
///
/// ```json
/// {
///   "employee_id": "550e8400-e29b-41d4-a716-446655440000",
///   "amount_cents": 150000,
///   "note": "January salary"
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct CreateTransferRequest {
    pub employee_id: Uuid,
    pub amount_cents: i64,

    #[serde(default)]
    pub note: Option<String>,

    /// Defaults to now when omitted
    #[serde(default)]
    pub transferred_at: Option<DateTime<Utc>>,
}
