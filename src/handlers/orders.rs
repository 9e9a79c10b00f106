//! Order HTTP handlers, customer-facing and staff-facing.
//!
//! Customer endpoints (any authenticated user, own orders only):
//! - POST /api/orders - Place an order for a service
//! - GET /api/orders - List own orders
//! - GET /api/orders/{id} - Own order with payment history
//!
//! Staff endpoints (admin + employee):
//! - GET /api/admin/orders - All orders, optional ?status= filter
//! - GET /api/admin/orders/{id} - Any order with payment history
//! - PUT /api/admin/orders/{id}/status - Lifecycle transition
//! - PUT /api/admin/orders/{id}/assign - Hand the order to a staff member
//!
//! Every order response carries the derived `paid_cents` and
//! `payment_status` fields next to the stored columns.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    db::AppState,
    error::AppError,
    middleware::auth::AuthContext,
    models::order::{
        AssignOrderRequest, CreateOrderRequest, Order, OrderDetailResponse, OrderResponse,
        OrderStatus, UpdateStatusRequest,
    },
    models::payment::Payment,
    services::{order_service, payment_service},
};

/// Place an order for a service.
///
/// # Response
///
/// - **201 Created**: the new order, `pending` and unpaid
/// - **404**: service missing or inactive
/// - **400**: empty title
pub async fn create_order(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), AppError> {
    let order = order_service::create_order(&state.pool, auth.user_id, request).await?;

    // A brand-new order has no payments yet
    Ok((StatusCode::CREATED, Json(OrderResponse::from_parts(order, 0))))
}

/// List the authenticated customer's own orders, newest first.
pub async fn list_my_orders(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Vec<OrderResponse>>, AppError> {
    let orders = sqlx::query_as::<_, Order>(
        "SELECT * FROM orders WHERE customer_id = $1 ORDER BY created_at DESC",
    )
    .bind(auth.user_id)
    .fetch_all(&state.pool)
    .await?;

    let ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
    let totals = payment_service::paid_totals(&state.pool, &ids).await?;

    Ok(Json(payment_service::merge_paid(orders, &totals)))
}

/// Get one of the authenticated customer's own orders, with payments.
///
/// The query filters by both id and customer_id, so customers cannot
/// probe for other people's orders (404 either way).
pub async fn get_my_order(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<OrderDetailResponse>, AppError> {
    let order = sqlx::query_as::<_, Order>(
        "SELECT * FROM orders WHERE id = $1 AND customer_id = $2",
    )
    .bind(order_id)
    .bind(auth.user_id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::NotFound("order"))?;

    order_detail(&state, order).await
}

/// Query parameters for `GET /api/admin/orders`.
#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    /// Restrict to one lifecycle status
    #[serde(default)]
    pub status: Option<String>,
}

/// List all orders (staff), optional status filter, newest first.
pub async fn list_all_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<Vec<OrderResponse>>, AppError> {
    // Reject unknown statuses instead of silently returning nothing
    if let Some(ref status) = query.status {
        if OrderStatus::parse(status).is_none() {
            return Err(AppError::InvalidRequest(format!(
                "unknown status '{}'",
                status
            )));
        }
    }

    let orders = sqlx::query_as::<_, Order>(
        r#"
        SELECT * FROM orders
        WHERE ($1::text IS NULL OR status = $1)
        ORDER BY created_at DESC
        "#,
    )
    .bind(query.status)
    .fetch_all(&state.pool)
    .await?;

    let ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
    let totals = payment_service::paid_totals(&state.pool, &ids).await?;

    Ok(Json(payment_service::merge_paid(orders, &totals)))
}

/// Get any order with payment history (staff).
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<OrderDetailResponse>, AppError> {
    let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
        .bind(order_id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or(AppError::NotFound("order"))?;

    order_detail(&state, order).await
}

/// Move an order through its lifecycle (staff).
///
/// # Response
///
/// - **200 OK**: the updated order
/// - **422**: transition not allowed (terminal state or no-op)
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<OrderResponse>, AppError> {
    let order = order_service::update_status(&state.pool, order_id, request.status).await?;
    let paid = payment_service::paid_total(&state.pool, order.id).await?;

    Ok(Json(OrderResponse::from_parts(order, paid)))
}

/// Assign an order to a staff member (staff).
pub async fn assign_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(request): Json<AssignOrderRequest>,
) -> Result<Json<OrderResponse>, AppError> {
    let order = order_service::assign(&state.pool, order_id, request.assigned_to).await?;
    let paid = payment_service::paid_total(&state.pool, order.id).await?;

    Ok(Json(OrderResponse::from_parts(order, paid)))
}

/// Shared tail for the detail endpoints: attach payments and totals.
async fn order_detail(
    state: &AppState,
    order: Order,
) -> Result<Json<OrderDetailResponse>, AppError> {
    let payments = sqlx::query_as::<_, Payment>(
        "SELECT * FROM payments WHERE order_id = $1 ORDER BY paid_at",
    )
    .bind(order.id)
    .fetch_all(&state.pool)
    .await?;

    let paid: i64 = payments.iter().map(|p| p.amount_cents).sum();

    Ok(Json(OrderDetailResponse {
        order: OrderResponse::from_parts(order, paid),
        payments,
    }))
}
