//! Authentication primitives: password hashing, session tokens, and
//! referral codes.
//!
//! Passwords are hashed with Argon2id (PHC string format). Session tokens
//! are 32 random bytes hex-encoded; the database stores only their SHA-256
//! hash, so neither a database leak nor a log leak yields a usable token.

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use rand::{Rng, RngCore};
use uuid::Uuid;

use crate::{
    db::DbPool, error::AppError, middleware::auth::hash_token, models::session::Session,
};

/// Characters used for referral codes. Ambiguous glyphs (0/O, 1/I/L) are
/// left out so codes survive being read over the phone.
const CODE_CHARS: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

/// Length of generated referral codes.
const CODE_LEN: usize = 8;

/// Hash a password with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| {
            tracing::error!(error = %err, "password hashing failed");
            AppError::PasswordHash
        })
}

/// Verify a password against a stored PHC hash string.
///
/// Returns `Ok(false)` on mismatch; `Err` only when the stored hash is
/// malformed.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|err| {
        tracing::error!(error = %err, "stored password hash is malformed");
        AppError::PasswordHash
    })?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Generate an opaque session token: 32 random bytes, hex-encoded.
pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Generate a referral code from the unambiguous charset.
pub fn generate_referral_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LEN)
        .map(|_| CODE_CHARS[rng.random_range(0..CODE_CHARS.len())] as char)
        .collect()
}

/// Create a session for a user and return the plaintext token together
/// with the stored session row.
///
/// The token itself is never stored; see [`hash_token`].
pub async fn create_session(
    pool: &DbPool,
    user_id: Uuid,
    ttl_hours: i64,
) -> Result<(String, Session), AppError> {
    let token = generate_token();
    let expires_at = Utc::now() + Duration::hours(ttl_hours);

    // Logins double as housekeeping: dead sessions only ever accumulate
    // otherwise, since the auth query merely filters on expiry.
    purge_expired_sessions(pool).await?;

    let session = sqlx::query_as::<_, Session>(
        r#"
        INSERT INTO sessions (user_id, token_hash, expires_at)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(hash_token(&token))
    .bind(expires_at)
    .fetch_one(pool)
    .await?;

    Ok((token, session))
}

/// Delete every expired session row.
///
/// Called from [`create_session`], so the table is trimmed on each login
/// without a dedicated background job.
pub async fn purge_expired_sessions(pool: &DbPool) -> Result<u64, AppError> {
    let purged = sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
        .execute(pool)
        .await?
        .rows_affected();

    if purged > 0 {
        tracing::debug!(purged, "expired sessions removed");
    }

    Ok(purged)
}

/// Revoke the session identified by a plaintext token, if it exists.
pub async fn revoke_session(pool: &DbPool, token: &str) -> Result<(), AppError> {
    sqlx::query("DELETE FROM sessions WHERE token_hash = $1")
        .bind(hash_token(token))
        .execute(pool)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_verifies_and_rejects() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("battery staple", &hash).unwrap());
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-phc-string").is_err());
    }

    #[test]
    fn tokens_are_64_hex_chars_and_unique() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn referral_codes_use_the_unambiguous_charset() {
        for _ in 0..50 {
            let code = generate_referral_code();
            assert_eq!(code.len(), CODE_LEN);
            assert!(code.bytes().all(|b| CODE_CHARS.contains(&b)));
        }
    }

    /// Run with `cargo test -- --ignored` against a migrated database.
    #[tokio::test]
    #[ignore = "requires a live PostgreSQL via DATABASE_URL"]
    async fn creating_a_session_purges_expired_ones() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let pool = crate::db::create_pool(&url).await.unwrap();
        crate::db::run_migrations(&pool).await.unwrap();

        let user_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO users (email, password_hash, full_name, referral_code)
            VALUES ($1, 'x', 'Purge Test', $2)
            RETURNING id
            "#,
        )
        .bind(format!("{}@purge.test", Uuid::new_v4()))
        .bind(generate_referral_code())
        .fetch_one(&pool)
        .await
        .unwrap();

        // An already-expired session for the same user
        sqlx::query(
            "INSERT INTO sessions (user_id, token_hash, expires_at)
             VALUES ($1, $2, NOW() - INTERVAL '1 hour')",
        )
        .bind(user_id)
        .bind(hash_token(&generate_token()))
        .execute(&pool)
        .await
        .unwrap();

        create_session(&pool, user_id, 1).await.unwrap();

        let stale: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sessions WHERE user_id = $1 AND expires_at <= NOW()",
        )
        .bind(user_id)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(stale, 0);

        let live: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sessions WHERE user_id = $1 AND expires_at > NOW()",
        )
        .bind(user_id)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(live, 1);
    }
}
