//! Transfer (employee payout) HTTP handlers (admin only).
//!
//! - GET /api/admin/transfers - List payouts, newest first
//! - POST /api/admin/transfers - Record a payout to a staff member

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
};
use chrono::Utc;

use crate::{
    db::AppState,
    error::AppError,
    middleware::auth::AuthContext,
    models::transfer::{CreateTransferRequest, Transfer},
    models::user::Role,
};

/// List transfers, newest first.
pub async fn list_transfers(
    State(state): State<AppState>,
) -> Result<Json<Vec<Transfer>>, AppError> {
    let transfers = sqlx::query_as::<_, Transfer>(
        "SELECT * FROM transfers ORDER BY transferred_at DESC",
    )
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(transfers))
}

/// Record a payout to a staff member.
///
/// # Response
///
/// - **201 Created**: the transfer record
/// - **404**: recipient does not exist
/// - **422**: recipient is not staff (customers cannot receive payouts)
/// - **400**: non-positive amount
pub async fn create_transfer(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CreateTransferRequest>,
) -> Result<(StatusCode, Json<Transfer>), AppError> {
    if request.amount_cents <= 0 {
        return Err(AppError::InvalidRequest(
            "amount must be positive".to_string(),
        ));
    }

    let recipient_role: String = sqlx::query_scalar("SELECT role FROM users WHERE id = $1")
        .bind(request.employee_id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    let payable = Role::parse(&recipient_role).is_some_and(|r| r.is_payable());
    if !payable {
        return Err(AppError::Unprocessable(
            "payouts can only go to staff members".to_string(),
        ));
    }

    let transfer = sqlx::query_as::<_, Transfer>(
        r#"
        INSERT INTO transfers (employee_id, amount_cents, note, transferred_at, recorded_by)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(request.employee_id)
    .bind(request.amount_cents)
    .bind(request.note)
    .bind(request.transferred_at.unwrap_or_else(Utc::now))
    .bind(auth.user_id)
    .fetch_one(&state.pool)
    .await?;

    tracing::info!(
        transfer_id = %transfer.id,
        employee_id = %transfer.employee_id,
        amount_cents = transfer.amount_cents,
        "transfer recorded"
    );

    Ok((StatusCode::CREATED, Json(transfer)))
}
