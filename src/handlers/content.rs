//! Admin CRUD handlers for catalog and marketing content (admin only).
//!
//! Covers categories, services, portfolio entries, testimonials, and FAQs.
//! Unlike the public catalog routes, the list endpoints here include
//! inactive services and unpublished content.
//!
//! All creates return 201 with the stored row; updates return 200; deletes
//! return 204. Duplicate names/slugs surface as 400 via the database
//! unique constraints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    db::AppState,
    error::AppError,
    models::{
        category::{Category, CategoryRequest},
        faq::{Faq, FaqRequest},
        portfolio::{PortfolioItem, PortfolioRequest},
        service::{Service, ServiceRequest},
        testimonial::{Testimonial, TestimonialRequest},
    },
};

/// Reject empty or whitespace-only required strings.
fn require_non_empty(field: &'static str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidRequest(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(())
}

fn validate_category(request: &CategoryRequest) -> Result<(), AppError> {
    require_non_empty("name", &request.name)?;
    require_non_empty("slug", &request.slug)
}

fn validate_service(request: &ServiceRequest) -> Result<(), AppError> {
    require_non_empty("name", &request.name)?;
    require_non_empty("slug", &request.slug)?;
    if request.price_cents < 0 {
        return Err(AppError::InvalidRequest(
            "price_cents must not be negative".to_string(),
        ));
    }
    Ok(())
}

// ---- Categories ----

/// List all categories through the admin surface.
pub async fn list_categories_admin(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, AppError> {
    let categories =
        sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY sort_order, name")
            .fetch_all(&state.pool)
            .await?;

    Ok(Json(categories))
}

pub async fn create_category(
    State(state): State<AppState>,
    Json(request): Json<CategoryRequest>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    validate_category(&request)?;

    let category = sqlx::query_as::<_, Category>(
        r#"
        INSERT INTO categories (name, slug, description, sort_order)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(request.name)
    .bind(request.slug)
    .bind(request.description)
    .bind(request.sort_order)
    .fetch_one(&state.pool)
    .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CategoryRequest>,
) -> Result<Json<Category>, AppError> {
    validate_category(&request)?;

    let category = sqlx::query_as::<_, Category>(
        r#"
        UPDATE categories
        SET name = $1, slug = $2, description = $3, sort_order = $4, updated_at = NOW()
        WHERE id = $5
        RETURNING *
        "#,
    )
    .bind(request.name)
    .bind(request.slug)
    .bind(request.description)
    .bind(request.sort_order)
    .bind(id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::NotFound("category"))?;

    Ok(Json(category))
}

/// Deleting a category cascades to its services (see schema).
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::NotFound("category"));
    }

    Ok(StatusCode::NO_CONTENT)
}

// ---- Services ----

/// List every service, active or not.
pub async fn list_services_admin(
    State(state): State<AppState>,
) -> Result<Json<Vec<Service>>, AppError> {
    let services =
        sqlx::query_as::<_, Service>("SELECT * FROM services ORDER BY name")
            .fetch_all(&state.pool)
            .await?;

    Ok(Json(services))
}

pub async fn create_service(
    State(state): State<AppState>,
    Json(request): Json<ServiceRequest>,
) -> Result<(StatusCode, Json<Service>), AppError> {
    validate_service(&request)?;

    // A clear 404 beats the raw foreign-key violation
    let category_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
            .bind(request.category_id)
            .fetch_one(&state.pool)
            .await?;
    if !category_exists {
        return Err(AppError::NotFound("category"));
    }

    let service = sqlx::query_as::<_, Service>(
        r#"
        INSERT INTO services (category_id, name, slug, description, price_cents, is_active)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(request.category_id)
    .bind(request.name)
    .bind(request.slug)
    .bind(request.description)
    .bind(request.price_cents)
    .bind(request.is_active)
    .fetch_one(&state.pool)
    .await?;

    Ok((StatusCode::CREATED, Json(service)))
}

pub async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ServiceRequest>,
) -> Result<Json<Service>, AppError> {
    validate_service(&request)?;

    let service = sqlx::query_as::<_, Service>(
        r#"
        UPDATE services
        SET category_id = $1, name = $2, slug = $3, description = $4,
            price_cents = $5, is_active = $6, updated_at = NOW()
        WHERE id = $7
        RETURNING *
        "#,
    )
    .bind(request.category_id)
    .bind(request.name)
    .bind(request.slug)
    .bind(request.description)
    .bind(request.price_cents)
    .bind(request.is_active)
    .bind(id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::NotFound("service"))?;

    Ok(Json(service))
}

pub async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = sqlx::query("DELETE FROM services WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::NotFound("service"));
    }

    Ok(StatusCode::NO_CONTENT)
}

// ---- Portfolio ----

/// List every portfolio entry, published or not.
pub async fn list_portfolio_admin(
    State(state): State<AppState>,
) -> Result<Json<Vec<PortfolioItem>>, AppError> {
    let items = sqlx::query_as::<_, PortfolioItem>(
        "SELECT * FROM portfolio ORDER BY created_at DESC",
    )
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(items))
}

pub async fn create_portfolio(
    State(state): State<AppState>,
    Json(request): Json<PortfolioRequest>,
) -> Result<(StatusCode, Json<PortfolioItem>), AppError> {
    require_non_empty("title", &request.title)?;
    require_non_empty("summary", &request.summary)?;

    let item = sqlx::query_as::<_, PortfolioItem>(
        r#"
        INSERT INTO portfolio (title, summary, image_url, service_id, published)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(request.title)
    .bind(request.summary)
    .bind(request.image_url)
    .bind(request.service_id)
    .bind(request.published)
    .fetch_one(&state.pool)
    .await?;

    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_portfolio(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<PortfolioRequest>,
) -> Result<Json<PortfolioItem>, AppError> {
    require_non_empty("title", &request.title)?;
    require_non_empty("summary", &request.summary)?;

    let item = sqlx::query_as::<_, PortfolioItem>(
        r#"
        UPDATE portfolio
        SET title = $1, summary = $2, image_url = $3, service_id = $4,
            published = $5, updated_at = NOW()
        WHERE id = $6
        RETURNING *
        "#,
    )
    .bind(request.title)
    .bind(request.summary)
    .bind(request.image_url)
    .bind(request.service_id)
    .bind(request.published)
    .bind(id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::NotFound("portfolio entry"))?;

    Ok(Json(item))
}

pub async fn delete_portfolio(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = sqlx::query("DELETE FROM portfolio WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::NotFound("portfolio entry"));
    }

    Ok(StatusCode::NO_CONTENT)
}

// ---- Testimonials ----

/// List every testimonial, published or not.
pub async fn list_testimonials_admin(
    State(state): State<AppState>,
) -> Result<Json<Vec<Testimonial>>, AppError> {
    let testimonials = sqlx::query_as::<_, Testimonial>(
        "SELECT * FROM testimonials ORDER BY created_at DESC",
    )
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(testimonials))
}

pub async fn create_testimonial(
    State(state): State<AppState>,
    Json(request): Json<TestimonialRequest>,
) -> Result<(StatusCode, Json<Testimonial>), AppError> {
    require_non_empty("author_name", &request.author_name)?;
    require_non_empty("quote", &request.quote)?;
    if !request.rating_is_valid() {
        return Err(AppError::InvalidRequest(
            "rating must be between 1 and 5".to_string(),
        ));
    }

    let testimonial = sqlx::query_as::<_, Testimonial>(
        r#"
        INSERT INTO testimonials (author_name, quote, rating, published)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(request.author_name)
    .bind(request.quote)
    .bind(request.rating)
    .bind(request.published)
    .fetch_one(&state.pool)
    .await?;

    Ok((StatusCode::CREATED, Json(testimonial)))
}

pub async fn update_testimonial(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TestimonialRequest>,
) -> Result<Json<Testimonial>, AppError> {
    require_non_empty("author_name", &request.author_name)?;
    require_non_empty("quote", &request.quote)?;
    if !request.rating_is_valid() {
        return Err(AppError::InvalidRequest(
            "rating must be between 1 and 5".to_string(),
        ));
    }

    let testimonial = sqlx::query_as::<_, Testimonial>(
        r#"
        UPDATE testimonials
        SET author_name = $1, quote = $2, rating = $3, published = $4
        WHERE id = $5
        RETURNING *
        "#,
    )
    .bind(request.author_name)
    .bind(request.quote)
    .bind(request.rating)
    .bind(request.published)
    .bind(id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::NotFound("testimonial"))?;

    Ok(Json(testimonial))
}

pub async fn delete_testimonial(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = sqlx::query("DELETE FROM testimonials WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::NotFound("testimonial"));
    }

    Ok(StatusCode::NO_CONTENT)
}

// ---- FAQs ----

/// List every FAQ, published or not.
pub async fn list_faqs_admin(State(state): State<AppState>) -> Result<Json<Vec<Faq>>, AppError> {
    let faqs = sqlx::query_as::<_, Faq>("SELECT * FROM faqs ORDER BY sort_order, created_at")
        .fetch_all(&state.pool)
        .await?;

    Ok(Json(faqs))
}

pub async fn create_faq(
    State(state): State<AppState>,
    Json(request): Json<FaqRequest>,
) -> Result<(StatusCode, Json<Faq>), AppError> {
    require_non_empty("question", &request.question)?;
    require_non_empty("answer", &request.answer)?;

    let faq = sqlx::query_as::<_, Faq>(
        r#"
        INSERT INTO faqs (question, answer, sort_order, published)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(request.question)
    .bind(request.answer)
    .bind(request.sort_order)
    .bind(request.published)
    .fetch_one(&state.pool)
    .await?;

    Ok((StatusCode::CREATED, Json(faq)))
}

pub async fn update_faq(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<FaqRequest>,
) -> Result<Json<Faq>, AppError> {
    require_non_empty("question", &request.question)?;
    require_non_empty("answer", &request.answer)?;

    let faq = sqlx::query_as::<_, Faq>(
        r#"
        UPDATE faqs
        SET question = $1, answer = $2, sort_order = $3, published = $4, updated_at = NOW()
        WHERE id = $5
        RETURNING *
        "#,
    )
    .bind(request.question)
    .bind(request.answer)
    .bind(request.sort_order)
    .bind(request.published)
    .bind(id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::NotFound("faq"))?;

    Ok(Json(faq))
}

pub async fn delete_faq(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = sqlx::query("DELETE FROM faqs WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::NotFound("faq"));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_blank_strings_are_rejected() {
        assert!(require_non_empty("name", "").is_err());
        assert!(require_non_empty("name", "   ").is_err());
        assert!(require_non_empty("name", "Essays").is_ok());
    }
}
