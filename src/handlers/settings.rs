//! Site settings HTTP handlers.
//!
//! - GET /api/settings - Public subset (site identity + contact)
//! - GET /api/admin/settings - Full settings row (admin)
//! - PUT /api/admin/settings - Update the settings row (admin)

use axum::{Json, extract::State};

use crate::{
    db::AppState,
    error::AppError,
    models::settings::{PublicSettings, Settings, UpdateSettingsRequest},
};

/// Public settings for the marketing pages.
pub async fn public_settings(
    State(state): State<AppState>,
) -> Result<Json<PublicSettings>, AppError> {
    let settings = fetch_settings(&state).await?;
    Ok(Json(settings.into()))
}

/// Full settings row, including the commission rate.
pub async fn get_settings(State(state): State<AppState>) -> Result<Json<Settings>, AppError> {
    let settings = fetch_settings(&state).await?;
    Ok(Json(settings))
}

/// Replace the settings row.
///
/// # Response
///
/// - **200 OK**: the updated row
/// - **400**: empty site name/email, or a commission rate outside 0..=100
pub async fn update_settings(
    State(state): State<AppState>,
    Json(request): Json<UpdateSettingsRequest>,
) -> Result<Json<Settings>, AppError> {
    if request.site_name.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "site_name must not be empty".to_string(),
        ));
    }
    if !request.contact_email.contains('@') {
        return Err(AppError::InvalidRequest(
            "contact_email is invalid".to_string(),
        ));
    }
    if !(0..=100).contains(&request.commission_rate_percent) {
        return Err(AppError::InvalidRequest(
            "commission_rate_percent must be between 0 and 100".to_string(),
        ));
    }

    let settings = sqlx::query_as::<_, Settings>(
        r#"
        UPDATE settings
        SET site_name = $1, tagline = $2, contact_email = $3, contact_phone = $4,
            currency = $5, commission_rate_percent = $6, updated_at = NOW()
        WHERE id = 1
        RETURNING *
        "#,
    )
    .bind(request.site_name)
    .bind(request.tagline)
    .bind(request.contact_email)
    .bind(request.contact_phone)
    .bind(request.currency)
    .bind(request.commission_rate_percent)
    .fetch_one(&state.pool)
    .await?;

    tracing::info!("site settings updated");

    Ok(Json(settings))
}

/// The settings row is seeded by the initial migration, so it always
/// exists.
async fn fetch_settings(state: &AppState) -> Result<Settings, AppError> {
    let settings = sqlx::query_as::<_, Settings>("SELECT * FROM settings WHERE id = 1")
        .fetch_one(&state.pool)
        .await?;

    Ok(settings)
}
