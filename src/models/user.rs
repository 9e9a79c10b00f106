//! User accounts, roles, and the auth API types.
//!
//! Users come in three roles: `admin` (full access), `employee` (order and
//! payment management), and `customer` (orders their own work). Every user
//! carries a unique referral code; a user whose code was used at another
//! user's registration becomes that user's referrer and earns commission on
//! their completed orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a user account, stored as lowercase text in the `users` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Employee,
    Customer,
}

impl Role {
    /// Parse a role from its database representation.
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "admin" => Some(Role::Admin),
            "employee" => Some(Role::Employee),
            "customer" => Some(Role::Customer),
            _ => None,
        }
    }

    /// Database / JSON representation of this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Employee => "employee",
            Role::Customer => "customer",
        }
    }

    /// Staff roles may manage orders and record payments.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Admin | Role::Employee)
    }

    /// Only admins may touch content, finance records, users and settings.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Roles eligible to receive payouts (transfers).
    pub fn is_payable(&self) -> bool {
        self.is_staff()
    }
}

/// Represents a user record from the database.
///
/// The `password_hash` is an Argon2id PHC string and never leaves the
/// server; responses use [`UserResponse`] instead.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,

    /// Stored as lowercase text, parsed into [`Role`] at the auth boundary
    pub role: String,

    /// Unique commission-earning code handed out at registration
    pub referral_code: String,

    /// The user whose referral code was used at registration, if any
    pub referred_by: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for `POST /api/auth/register`.
///
/// ```json
/// {
///   "email": "jo@example.com",
///   "password": "hunter22!",
///   "full_name": "Jo Mensah",
///   "referral_code": "K3W9XA2B"
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,

    /// Referral code of an existing user (optional)
    #[serde(default)]
    pub referral_code: Option<String>,
}

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `PUT /api/admin/users/{id}/role`.
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Role,
}

/// Response body for user endpoints. Strips the password hash.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub referral_code: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
            referral_code: user.referral_code,
            created_at: user.created_at,
        }
    }
}

/// Response body for `POST /api/auth/login`: the session token (shown
/// exactly once) plus the authenticated user.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Opaque bearer token; only its SHA-256 hash is stored server-side
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_text() {
        for role in [Role::Admin, Role::Employee, Role::Customer] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("superuser"), None);
        assert_eq!(Role::parse("Admin"), None);
    }

    #[test]
    fn staff_and_admin_checks() {
        assert!(Role::Admin.is_staff());
        assert!(Role::Employee.is_staff());
        assert!(!Role::Customer.is_staff());

        assert!(Role::Admin.is_admin());
        assert!(!Role::Employee.is_admin());

        assert!(Role::Employee.is_payable());
        assert!(!Role::Customer.is_payable());
    }
}
