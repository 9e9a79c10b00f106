//! Login session model.
//!
//! Sessions are issued at login as opaque random tokens. Only the SHA-256
//! hash of the token is stored, so a leaked database dump cannot be replayed
//! against the API.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Represents a session record from the `sessions` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Session {
    pub id: Uuid,

    /// Owner of this session
    pub user_id: Uuid,

    /// SHA-256 hash of the bearer token (64 hex characters)
    pub token_hash: String,

    /// Sessions past this instant are rejected during authentication
    pub expires_at: DateTime<Utc>,

    pub created_at: DateTime<Utc>,
}
