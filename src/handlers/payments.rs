//! Payment HTTP handlers (staff).
//!
//! - POST /api/admin/orders/{id}/payments - Record a payment
//! - GET /api/admin/payments - Recent payments across all orders

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
    models::payment::{Payment, RecordPaymentRequest},
    services::payment_service,
};

/// Record a payment against an order.
///
/// # Request Body
///
/// ```json
/// {
///   "amount_cents": 2500,
///   "method": "bank_transfer",
///   "reference": "SLIP-0042"
/// }
/// ```
///
/// # Response
///
/// - **201 Created**: the payment record
/// - **404**: order does not exist
/// - **422**: cancelled order, or amount exceeds the outstanding balance
pub async fn record_order_payment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(order_id): Path<Uuid>,
    Json(request): Json<RecordPaymentRequest>,
) -> Result<(StatusCode, Json<Payment>), AppError> {
    let payment =
        payment_service::record_payment(&state.pool, order_id, auth.user_id, request).await?;

    Ok((StatusCode::CREATED, Json(payment)))
}

/// List the 100 most recent payments.
pub async fn list_payments(
    State(state): State<AppState>,
) -> Result<Json<Vec<Payment>>, AppError> {
    let payments = sqlx::query_as::<_, Payment>(
        "SELECT * FROM payments ORDER BY paid_at DESC LIMIT 100",
    )
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(payments))
}
