//! Site settings singleton model and API types.
//!
//! Settings live in a single row (id = 1, enforced by a CHECK constraint).
//! The public endpoint exposes only the site identity and contact fields;
//! the commission rate is admin-only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents the settings row from the database.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Settings {
    pub id: i16,
    pub site_name: String,
    pub tagline: Option<String>,
    pub contact_email: String,
    pub contact_phone: Option<String>,

    /// ISO 4217 code used for display only; amounts are plain cents
    pub currency: String,

    /// Referral commission, percent of the order price (0..=100)
    pub commission_rate_percent: i32,

    pub updated_at: DateTime<Utc>,
}

/// Request body for `PUT /api/admin/settings`.
#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    pub site_name: String,

    #[serde(default)]
    pub tagline: Option<String>,

    pub contact_email: String,

    #[serde(default)]
    pub contact_phone: Option<String>,

    pub currency: String,
    pub commission_rate_percent: i32,
}

/// Public subset of [`Settings`] returned by `GET /api/settings`.
#[derive(Debug, Serialize)]
pub struct PublicSettings {
    pub site_name: String,
    pub tagline: Option<String>,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub currency: String,
}

impl From<Settings> for PublicSettings {
    fn from(settings: Settings) -> Self {
        Self {
            site_name: settings.site_name,
            tagline: settings.tagline,
            contact_email: settings.contact_email,
            contact_phone: settings.contact_phone,
            currency: settings.currency,
        }
    }
}
