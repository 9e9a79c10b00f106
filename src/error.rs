//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code and error message.
///
/// # Error Categories
///
/// - **Database Errors**: Any sqlx::Error from database operations
/// - **Authentication Errors**: Missing, invalid or expired sessions
/// - **Authorization Errors**: Authenticated but lacking the required role
/// - **Resource Errors**: Requested resources not found
/// - **Business Rule Errors**: Operations that violate order/payment rules
/// - **Validation Errors**: Invalid request data, including unique-constraint
///   violations surfaced by the database
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (e.g., connection error, query error).
    ///
    /// Unique-constraint violations are intercepted in `From` and reported
    /// as [`AppError::Duplicate`] instead; everything else stays here and
    /// maps to HTTP 500 with a generic message.
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// Session token is missing, invalid, or expired.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Invalid or expired session")]
    Unauthorized,

    /// Credentials did not match during login.
    ///
    /// Returns HTTP 401 Unauthorized. Kept distinct from `Unauthorized`
    /// so login failures carry their own error code.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The authenticated user lacks the role required for this route.
    ///
    /// Returns HTTP 403 Forbidden.
    #[error("Insufficient permissions")]
    Forbidden,

    /// Requested resource does not exist or is not visible to the caller.
    ///
    /// Returns HTTP 404 Not Found. The str names the resource kind.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A uniqueness constraint was violated (duplicate email, slug, name).
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("Duplicate value violates a uniqueness constraint")]
    Duplicate,

    /// Operation violates a business rule (overpayment, reopening a
    /// completed order, paying out to a non-employee).
    ///
    /// Returns HTTP 422 Unprocessable Entity.
    #[error("{0}")]
    Unprocessable(String),

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String contains details about what was invalid.
    #[error("Invalid request")]
    InvalidRequest(String),

    /// Password hashing or verification failed internally.
    ///
    /// Returns HTTP 500. The underlying reason is logged, never sent to
    /// the client.
    #[error("Password hashing error")]
    PasswordHash,
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        // Postgres signals unique-constraint violations with SQLSTATE 23505.
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.code().as_deref() == Some("23505") {
                return AppError::Duplicate;
            }
        }
        AppError::Database(err)
    }
}

/// Convert AppError into an HTTP response.
///
/// This implementation allows Axum handlers to return `Result<T, AppError>`
/// and have errors automatically converted to proper HTTP responses.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map each error variant to (HTTP status, error code, message)
        let (status, code, message) = match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", self.to_string()),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                self.to_string(),
            ),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "forbidden", self.to_string()),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", self.to_string()),
            AppError::Duplicate => (StatusCode::BAD_REQUEST, "duplicate", self.to_string()),
            AppError::Unprocessable(ref msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "unprocessable",
                msg.clone(),
            ),
            AppError::InvalidRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            AppError::Database(ref err) => {
                tracing::error!(error = %err, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::PasswordHash => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "An internal error occurred".to_string(),
            ),
        };

        // Build JSON response body
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_error_contract() {
        assert_eq!(
            AppError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::InvalidCredentials.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Forbidden.into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::NotFound("order").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Duplicate.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unprocessable("overpayment".into())
                .into_response()
                .status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::InvalidRequest("missing field".into())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn not_found_message_names_the_resource() {
        assert_eq!(
            AppError::NotFound("service").to_string(),
            "service not found"
        );
    }
}
