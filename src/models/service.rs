//! Academic service model and API types.
//!
//! A service is a purchasable catalog item (e.g. "Undergraduate essay,
//! per 1000 words"). Prices are stored in integer cents to avoid
//! floating-point errors; the price is snapshotted onto every order at
//! creation so later price edits do not rewrite history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a service record from the database.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Service {
    pub id: Uuid,

    /// Category this service is listed under
    pub category_id: Uuid,

    pub name: String,

    /// URL-safe identifier, unique across all services
    pub slug: String,

    pub description: Option<String>,

    /// Price in cents (e.g. $49.99 is stored as 4999)
    pub price_cents: i64,

    /// Inactive services are hidden from the public catalog but remain
    /// referenced by existing orders
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or updating a service.
///
/// ```json
/// {
///   "category_id": "550e8400-e29b-41d4-a716-446655440000",
///   "name": "Undergraduate essay",
///   "slug": "undergraduate-essay",
///   "description": "Per 1000 words, 7-day turnaround",
///   "price_cents": 4999,
///   "is_active": true
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct ServiceRequest {
    pub category_id: Uuid,
    pub name: String,
    pub slug: String,

    #[serde(default)]
    pub description: Option<String>,

    pub price_cents: i64,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}
