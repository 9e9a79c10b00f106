//! Finance stats HTTP handler (admin only).
//!
//! - GET /api/admin/finance/stats?from=2026-01-01&to=2026-01-31

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    db::AppState,
    error::AppError,
    services::finance_service::{self, FinanceStats},
};

/// Query parameters for the stats endpoint. Both bounds are optional and
/// inclusive.
#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    #[serde(default)]
    pub from: Option<NaiveDate>,

    #[serde(default)]
    pub to: Option<NaiveDate>,
}

/// Aggregate finance figures over an optional date range.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "revenue_cents": 420000,
///   "expenses_cents": 120000,
///   "transfers_cents": 150000,
///   "commissions_cents": 18000,
///   "net_cents": 150000,
///   "orders": { "pending": 2, "in_progress": 5, "completed": 31, "cancelled": 1 }
/// }
/// ```
pub async fn finance_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<FinanceStats>, AppError> {
    if let (Some(from), Some(to)) = (query.from, query.to) {
        if from > to {
            return Err(AppError::InvalidRequest(
                "'from' must not be after 'to'".to_string(),
            ));
        }
    }

    let stats = finance_service::stats(&state.pool, query.from, query.to).await?;

    Ok(Json(stats))
}
