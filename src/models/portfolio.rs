//! Portfolio entry model and API types.
//!
//! Portfolio entries showcase anonymized past work on the public site.
//! Only published entries are visible publicly; admins see everything.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a portfolio record from the database.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct PortfolioItem {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub image_url: Option<String>,

    /// Service this work sample belongs to, if still listed
    pub service_id: Option<Uuid>,

    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or updating a portfolio entry.
#[derive(Debug, Deserialize)]
pub struct PortfolioRequest {
    pub title: String,
    pub summary: String,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub service_id: Option<Uuid>,

    #[serde(default)]
    pub published: bool,
}
