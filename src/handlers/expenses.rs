//! Expense HTTP handlers (admin only).
//!
//! - GET /api/admin/expenses - List expenses, newest first
//! - POST /api/admin/expenses - Record an expense
//! - DELETE /api/admin/expenses/{id} - Remove a mis-entered expense

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    db::AppState,
    error::AppError,
    middleware::auth::AuthContext,
    models::expense::{CreateExpenseRequest, Expense},
};

/// List expenses, newest first.
pub async fn list_expenses(State(state): State<AppState>) -> Result<Json<Vec<Expense>>, AppError> {
    let expenses = sqlx::query_as::<_, Expense>(
        "SELECT * FROM expenses ORDER BY incurred_on DESC, created_at DESC",
    )
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(expenses))
}

/// Record a business expense.
///
/// # Response
///
/// - **201 Created**: the expense record
/// - **400**: empty label or non-positive amount
pub async fn create_expense(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<Expense>), AppError> {
    if request.label.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "label must not be empty".to_string(),
        ));
    }
    if request.amount_cents <= 0 {
        return Err(AppError::InvalidRequest(
            "amount must be positive".to_string(),
        ));
    }

    let expense = sqlx::query_as::<_, Expense>(
        r#"
        INSERT INTO expenses (label, amount_cents, category, incurred_on, recorded_by)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(request.label)
    .bind(request.amount_cents)
    .bind(request.category)
    .bind(request.incurred_on)
    .bind(auth.user_id)
    .fetch_one(&state.pool)
    .await?;

    Ok((StatusCode::CREATED, Json(expense)))
}

/// Delete an expense record.
pub async fn delete_expense(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = sqlx::query("DELETE FROM expenses WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::NotFound("expense"));
    }

    Ok(StatusCode::NO_CONTENT)
}
