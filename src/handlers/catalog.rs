//! Public catalog HTTP handlers.
//!
//! These endpoints require no authentication and back the marketing pages:
//! - GET /api/categories
//! - GET /api/services (optionally ?category=<slug>)
//! - GET /api/services/{slug}
//! - GET /api/portfolio
//! - GET /api/testimonials
//! - GET /api/faqs
//!
//! Inactive services and unpublished content never appear here; admins see
//! them through the `/api/admin` routes instead.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::{
    db::AppState,
    error::AppError,
    models::{
        category::Category, faq::Faq, portfolio::PortfolioItem, service::Service,
        testimonial::Testimonial,
    },
};

/// List all categories, in display order.
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, AppError> {
    let categories = sqlx::query_as::<_, Category>(
        "SELECT * FROM categories ORDER BY sort_order, name",
    )
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(categories))
}

/// Query parameters for `GET /api/services`.
#[derive(Debug, Deserialize)]
pub struct ServiceListQuery {
    /// Restrict to one category by slug
    #[serde(default)]
    pub category: Option<String>,
}

/// List active services, optionally filtered by category slug.
pub async fn list_services(
    State(state): State<AppState>,
    Query(query): Query<ServiceListQuery>,
) -> Result<Json<Vec<Service>>, AppError> {
    let services = sqlx::query_as::<_, Service>(
        r#"
        SELECT s.* FROM services s
        JOIN categories c ON c.id = s.category_id
        WHERE s.is_active = TRUE
          AND ($1::text IS NULL OR c.slug = $1)
        ORDER BY s.name
        "#,
    )
    .bind(query.category)
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(services))
}

/// Get one active service by slug.
pub async fn get_service(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Service>, AppError> {
    let service = sqlx::query_as::<_, Service>(
        "SELECT * FROM services WHERE slug = $1 AND is_active = TRUE",
    )
    .bind(slug)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::NotFound("service"))?;

    Ok(Json(service))
}

/// List published portfolio entries, newest first.
pub async fn list_portfolio(
    State(state): State<AppState>,
) -> Result<Json<Vec<PortfolioItem>>, AppError> {
    let items = sqlx::query_as::<_, PortfolioItem>(
        "SELECT * FROM portfolio WHERE published = TRUE ORDER BY created_at DESC",
    )
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(items))
}

/// List published testimonials, newest first.
pub async fn list_testimonials(
    State(state): State<AppState>,
) -> Result<Json<Vec<Testimonial>>, AppError> {
    let testimonials = sqlx::query_as::<_, Testimonial>(
        "SELECT * FROM testimonials WHERE published = TRUE ORDER BY created_at DESC",
    )
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(testimonials))
}

/// List published FAQs in display order.
pub async fn list_faqs(State(state): State<AppState>) -> Result<Json<Vec<Faq>>, AppError> {
    let faqs = sqlx::query_as::<_, Faq>(
        "SELECT * FROM faqs WHERE published = TRUE ORDER BY sort_order, created_at",
    )
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(faqs))
}
