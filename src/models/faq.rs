//! FAQ model and API types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents an FAQ record from the database.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Faq {
    pub id: Uuid,
    pub question: String,
    pub answer: String,

    /// Display position, ascending
    pub sort_order: i32,

    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or updating an FAQ.
#[derive(Debug, Deserialize)]
pub struct FaqRequest {
    pub question: String,
    pub answer: String,

    #[serde(default)]
    pub sort_order: i32,

    #[serde(default = "default_published")]
    pub published: bool,
}

fn default_published() -> bool {
    true
}
