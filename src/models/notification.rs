//! Customer notification model.
//!
//! Notifications are in-app messages written when something happens to a
//! customer's order (status change, payment recorded). They are plain rows;
//! delivery is the frontend polling `GET /api/notifications`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Represents a notification record from the database.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Notification {
    pub id: Uuid,

    /// Recipient
    pub user_id: Uuid,

    pub title: String,
    pub body: String,

    /// Machine-readable kind ("order_status", "payment", "general")
    pub kind: String,

    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
