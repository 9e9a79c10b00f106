//! Service category model and API types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a category record from the database.
///
/// Categories group services in the public catalog (e.g. "Essays",
/// "Dissertations", "Proofreading"). Both `name` and `slug` are unique.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,

    /// URL-safe identifier used by the public catalog routes
    pub slug: String,

    pub description: Option<String>,

    /// Display position, ascending
    pub sort_order: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or updating a category.
#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
    pub slug: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub sort_order: i32,
}
