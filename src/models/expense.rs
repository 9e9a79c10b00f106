//! Business expense model and API types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents an expense record from the database.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Expense {
    pub id: Uuid,

    /// What the money was spent on
    pub label: String,

    /// Amount in cents, always positive
    pub amount_cents: i64,

    /// Free-form bucket ("software", "marketing", "office")
    pub category: String,

    /// The day the expense was incurred
    pub incurred_on: NaiveDate,

    /// Admin who recorded this expense
    pub recorded_by: Uuid,

    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /api/admin/expenses`.
#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    pub label: String,
    pub amount_cents: i64,

    #[serde(default = "default_category")]
    pub category: String,

    pub incurred_on: NaiveDate,
}

fn default_category() -> String {
    "general".to_string()
}
