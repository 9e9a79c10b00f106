//! User administration HTTP handlers (admin only).
//!
//! - GET /api/admin/users - List all users
//! - PUT /api/admin/users/{id}/role - Change a user's role

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::{
    db::AppState,
    error::AppError,
    middleware::auth::AuthContext,
    models::user::{UpdateRoleRequest, User, UserResponse},
};

/// List all users, newest first.
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
        .fetch_all(&state.pool)
        .await?;

    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// Change a user's role.
///
/// Admins cannot change their own role; that guards against a lone admin
/// locking every admin route.
///
/// # Response
///
/// - **200 OK**: the updated user
/// - **404**: user does not exist
/// - **422**: attempt to change own role
pub async fn update_role(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<UpdateRoleRequest>,
) -> Result<Json<UserResponse>, AppError> {
    if user_id == auth.user_id {
        return Err(AppError::Unprocessable(
            "admins cannot change their own role".to_string(),
        ));
    }

    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET role = $1, updated_at = NOW()
        WHERE id = $2
        RETURNING *
        "#,
    )
    .bind(request.role.as_str())
    .bind(user_id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::NotFound("user"))?;

    tracing::info!(user_id = %user.id, role = %user.role, "user role updated");

    Ok(Json(user.into()))
}
