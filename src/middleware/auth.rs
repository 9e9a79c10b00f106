//! Session authentication middleware and role gates.
//!
//! The auth middleware intercepts every protected request to:
//! 1. Extract the session token from the Authorization header
//! 2. Hash it and look up a live session joined with its user
//! 3. Inject an [`AuthContext`] into the request extensions
//! 4. Reject missing/expired sessions with HTTP 401
//!
//! The role gates (`require_staff`, `require_admin`) run after the auth
//! middleware and reject requests whose context lacks the required role
//! with HTTP 403. Together with the route groups in `main.rs` they form
//! the role-based route-access table: public, customer, staff, admin.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::{
    db::AppState,
    error::AppError,
    models::user::Role,
};

/// Authentication context attached to authenticated requests.
///
/// Inserted into the request's extension map; route handlers extract it
/// with `Extension<AuthContext>` to know who made the request.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// ID of the authenticated user
    pub user_id: Uuid,

    /// Parsed role, used by the gates and by ownership checks in handlers
    pub role: Role,

    /// Display name, handy for notification texts and logs
    pub full_name: String,
}

/// Hash a session token the way it is stored in the `sessions` table.
///
/// Tokens are opaque random strings; only this SHA-256 hex digest ever
/// touches the database.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Row shape for the session-with-user lookup below.
#[derive(Debug, sqlx::FromRow)]
struct SessionUser {
    user_id: Uuid,
    role: String,
    full_name: String,
}

/// Session authentication middleware.
///
/// # Flow
///
/// 1. Extract `Authorization: Bearer <token>` header from the request
/// 2. Hash the token with SHA-256
/// 3. Query for a session with that hash that has not expired, joined
///    with its user
/// 4. If found: inject [`AuthContext`], call the next handler
/// 5. If not: return 401 Unauthorized
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extract Authorization header, expected format: "Bearer <token>"
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AppError::Unauthorized)?;

    let token_hash = hash_token(token);

    // Look up a live session joined with its user
    let row = sqlx::query_as::<_, SessionUser>(
        r#"
        SELECT u.id AS user_id, u.role, u.full_name
        FROM sessions s
        JOIN users u ON u.id = s.user_id
        WHERE s.token_hash = $1 AND s.expires_at > NOW()
        "#,
    )
    .bind(&token_hash)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::Unauthorized)?;

    // A role the parser does not know means the row was tampered with;
    // treat it as an invalid session rather than a server error.
    let role = Role::parse(&row.role).ok_or(AppError::Unauthorized)?;

    let auth_context = AuthContext {
        user_id: row.user_id,
        role,
        full_name: row.full_name,
    };

    // Handlers can now extract this with Extension<AuthContext>
    request.extensions_mut().insert(auth_context);

    Ok(next.run(request).await)
}

/// Role gate for staff routes (admin + employee): order management and
/// payment recording.
pub async fn require_staff(request: Request, next: Next) -> Result<Response, AppError> {
    let auth = request
        .extensions()
        .get::<AuthContext>()
        .ok_or(AppError::Unauthorized)?;

    if !auth.role.is_staff() {
        return Err(AppError::Forbidden);
    }

    Ok(next.run(request).await)
}

/// Role gate for admin-only routes: content CRUD, finance records,
/// users, and settings.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, AppError> {
    let auth = request
        .extensions()
        .get::<AuthContext>()
        .ok_or(AppError::Unauthorized)?;

    if !auth.role.is_admin() {
        return Err(AppError::Forbidden);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_hash_is_deterministic_hex_sha256() {
        let a = hash_token("tok-123");
        let b = hash_token("tok-123");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn different_tokens_hash_differently() {
        assert_ne!(hash_token("tok-123"), hash_token("tok-124"));
    }
}
