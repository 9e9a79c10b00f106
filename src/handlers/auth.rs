//! Authentication HTTP handlers.
//!
//! - POST /api/auth/register - Create a customer account
//! - POST /api/auth/login - Exchange credentials for a session token
//! - POST /api/auth/logout - Revoke the presented session
//! - GET /api/auth/me - Profile of the authenticated user

use axum::{
    Extension, Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use uuid::Uuid;

use crate::{
    db::AppState,
    error::AppError,
    middleware::auth::AuthContext,
    models::user::{LoginRequest, LoginResponse, RegisterRequest, User, UserResponse},
    services::auth_service,
};

/// Minimum accepted password length.
const MIN_PASSWORD_LEN: usize = 8;

/// Normalize an email for storage and lookup: trim surrounding whitespace
/// and lowercase. Register and login both go through this, so an address
/// typed with stray spaces at signup still matches at login.
fn normalize_email(email: &str) -> Result<String, AppError> {
    let email = email.trim().to_lowercase();
    if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
        return Err(AppError::InvalidRequest("invalid email".to_string()));
    }
    Ok(email)
}

/// Register a new customer account.
///
/// # Request Body
///
/// ```json
/// {
///   "email": "jo@example.com",
///   "password": "hunter22!",
///   "full_name": "Jo Mensah",
///   "referral_code": "K3W9XA2B"
/// }
/// ```
///
/// # Response
///
/// - **201 Created**: the new user (every registration starts as `customer`)
/// - **400**: missing/short fields, unknown referral code, duplicate email
///
/// The optional `referral_code` must belong to an existing user, who then
/// becomes this user's referrer and earns commission on their completed
/// orders.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let email = normalize_email(&request.email)?;
    if request.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::InvalidRequest(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    if request.full_name.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "full_name must not be empty".to_string(),
        ));
    }

    // Resolve the referral code (if given) to its owner
    let referred_by: Option<Uuid> = match request.referral_code.as_deref() {
        Some(code) => Some(
            sqlx::query_scalar("SELECT id FROM users WHERE referral_code = $1")
                .bind(code)
                .fetch_optional(&state.pool)
                .await?
                .ok_or_else(|| AppError::InvalidRequest("unknown referral code".to_string()))?,
        ),
        None => None,
    };

    let password_hash = auth_service::hash_password(&request.password)?;

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email, password_hash, full_name, referral_code, referred_by)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(email)
    .bind(password_hash)
    .bind(request.full_name)
    .bind(auth_service::generate_referral_code())
    .bind(referred_by)
    .fetch_one(&state.pool)
    .await?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Log in with email and password.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "token": "9f2c...64 hex chars...",
///   "expires_at": "2026-01-19T10:00:00Z",
///   "user": { "id": "...", "email": "...", "role": "customer" }
/// }
/// ```
///
/// The token is shown exactly once; only its hash is stored.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let email = normalize_email(&request.email).map_err(|_| AppError::InvalidCredentials)?;

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(&state.pool)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !auth_service::verify_password(&request.password, &user.password_hash)? {
        return Err(AppError::InvalidCredentials);
    }

    let (token, session) =
        auth_service::create_session(&state.pool, user.id, state.session_ttl_hours).await?;

    tracing::info!(user_id = %user.id, "user logged in");

    Ok(Json(LoginResponse {
        token,
        expires_at: session.expires_at,
        user: user.into(),
    }))
}

/// Revoke the session presented in the Authorization header.
///
/// Runs behind the auth middleware, so the header is known to carry a
/// valid session.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let token = headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(AppError::Unauthorized)?;

    auth_service::revoke_session(&state.pool, token).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Profile of the authenticated user.
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<UserResponse>, AppError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(auth.user_id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails_are_trimmed_and_lowercased() {
        assert_eq!(normalize_email(" Jo@Example.COM ").unwrap(), "jo@example.com");
        assert_eq!(normalize_email("a@b.co").unwrap(), "a@b.co");
    }

    #[test]
    fn signup_and_login_normalize_identically() {
        // The forms a user is likely to type for the same address
        for raw in ["jo@example.com", " jo@example.com", "JO@EXAMPLE.COM ", "\tjo@example.com\n"] {
            assert_eq!(normalize_email(raw).unwrap(), "jo@example.com");
        }
    }

    #[test]
    fn degenerate_emails_are_rejected() {
        assert!(normalize_email("").is_err());
        assert!(normalize_email("   ").is_err());
        assert!(normalize_email("no-at-sign").is_err());
        assert!(normalize_email("@example.com").is_err());
        assert!(normalize_email("jo@").is_err());
    }
}
