//! AcadHub - Backend for an academic-services business.
//!
//! A JSON API server behind the public site and the admin dashboard:
//! a customer-facing service catalog and marketing content, customer
//! ordering with referral commissions, and role-gated staff tooling for
//! orders, payments, expenses, payouts, and site settings.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries)
//! - **Authentication**: session tokens with SHA-256 hashing, Argon2id
//!   passwords
//! - **Authorization**: role groups (public / customer / staff / admin)
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool
//! 3. Run database migrations
//! 4. Build HTTP router with route groups and middleware
//! 5. Start server on configured port

mod config;
mod db;
mod error;
mod handlers;
mod middleware;
mod models;
mod services;

use tracing_subscriber::EnvFilter;

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG (defaults to "info")
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Create database pool
    let pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Database pool created");

    // Run migrations
    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    let state = AppState {
        pool,
        session_ttl_hours: config.session_ttl_hours,
    };

    let app = app_router(state);

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Serve HTTP requests, handled concurrently by tokio
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the full application router: the role-based route-access table
/// expressed as route groups (public / customer / staff / admin).
fn app_router(state: AppState) -> Router {
    // Public routes: marketing pages and credential endpoints
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/categories", get(handlers::catalog::list_categories))
        .route("/api/services", get(handlers::catalog::list_services))
        .route("/api/services/{slug}", get(handlers::catalog::get_service))
        .route("/api/portfolio", get(handlers::catalog::list_portfolio))
        .route(
            "/api/testimonials",
            get(handlers::catalog::list_testimonials),
        )
        .route("/api/faqs", get(handlers::catalog::list_faqs))
        .route("/api/settings", get(handlers::settings::public_settings));

    // Customer routes: any authenticated user, own data only
    let customer_routes = Router::new()
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route("/api/auth/me", get(handlers::auth::me))
        .route("/api/orders", post(handlers::orders::create_order))
        .route("/api/orders", get(handlers::orders::list_my_orders))
        .route("/api/orders/{id}", get(handlers::orders::get_my_order))
        .route(
            "/api/notifications",
            get(handlers::notifications::list_notifications),
        )
        .route(
            "/api/notifications/{id}/read",
            post(handlers::notifications::mark_read),
        )
        .route(
            "/api/notifications/read-all",
            post(handlers::notifications::mark_all_read),
        );

    // Staff routes: admins and employees manage orders and payments
    let staff_routes = Router::new()
        .route("/api/admin/orders", get(handlers::orders::list_all_orders))
        .route("/api/admin/orders/{id}", get(handlers::orders::get_order))
        .route(
            "/api/admin/orders/{id}/status",
            put(handlers::orders::update_order_status),
        )
        .route(
            "/api/admin/orders/{id}/assign",
            put(handlers::orders::assign_order),
        )
        .route(
            "/api/admin/orders/{id}/payments",
            post(handlers::payments::record_order_payment),
        )
        .route("/api/admin/payments", get(handlers::payments::list_payments))
        .route_layer(axum_middleware::from_fn(
            middleware::auth::require_staff,
        ));

    // Admin routes: content, finance records, users, settings
    let admin_routes = Router::new()
        .route(
            "/api/admin/categories",
            get(handlers::content::list_categories_admin),
        )
        .route(
            "/api/admin/categories",
            post(handlers::content::create_category),
        )
        .route(
            "/api/admin/categories/{id}",
            put(handlers::content::update_category),
        )
        .route(
            "/api/admin/categories/{id}",
            delete(handlers::content::delete_category),
        )
        .route(
            "/api/admin/services",
            get(handlers::content::list_services_admin),
        )
        .route(
            "/api/admin/services",
            post(handlers::content::create_service),
        )
        .route(
            "/api/admin/services/{id}",
            put(handlers::content::update_service),
        )
        .route(
            "/api/admin/services/{id}",
            delete(handlers::content::delete_service),
        )
        .route(
            "/api/admin/portfolio",
            get(handlers::content::list_portfolio_admin),
        )
        .route(
            "/api/admin/portfolio",
            post(handlers::content::create_portfolio),
        )
        .route(
            "/api/admin/portfolio/{id}",
            put(handlers::content::update_portfolio),
        )
        .route(
            "/api/admin/portfolio/{id}",
            delete(handlers::content::delete_portfolio),
        )
        .route(
            "/api/admin/testimonials",
            get(handlers::content::list_testimonials_admin),
        )
        .route(
            "/api/admin/testimonials",
            post(handlers::content::create_testimonial),
        )
        .route(
            "/api/admin/testimonials/{id}",
            put(handlers::content::update_testimonial),
        )
        .route(
            "/api/admin/testimonials/{id}",
            delete(handlers::content::delete_testimonial),
        )
        .route("/api/admin/faqs", get(handlers::content::list_faqs_admin))
        .route("/api/admin/faqs", post(handlers::content::create_faq))
        .route("/api/admin/faqs/{id}", put(handlers::content::update_faq))
        .route(
            "/api/admin/faqs/{id}",
            delete(handlers::content::delete_faq),
        )
        .route("/api/admin/settings", get(handlers::settings::get_settings))
        .route(
            "/api/admin/settings",
            put(handlers::settings::update_settings),
        )
        .route("/api/admin/expenses", get(handlers::expenses::list_expenses))
        .route(
            "/api/admin/expenses",
            post(handlers::expenses::create_expense),
        )
        .route(
            "/api/admin/expenses/{id}",
            delete(handlers::expenses::delete_expense),
        )
        .route(
            "/api/admin/transfers",
            get(handlers::transfers::list_transfers),
        )
        .route(
            "/api/admin/transfers",
            post(handlers::transfers::create_transfer),
        )
        .route(
            "/api/admin/finance/stats",
            get(handlers::finance::finance_stats),
        )
        .route("/api/admin/users", get(handlers::users::list_users))
        .route(
            "/api/admin/users/{id}/role",
            put(handlers::users::update_role),
        )
        .route_layer(axum_middleware::from_fn(
            middleware::auth::require_admin,
        ));

    // Session auth wraps every non-public group; the role gates above run
    // after it and read the injected AuthContext
    let authenticated_routes = customer_routes
        .merge(staff_routes)
        .merge(admin_routes)
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        // Request tracing for observability
        .layer(TraceLayer::new_for_http())
        // The dashboard frontend is served from another origin
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    /// Router over a lazy pool: nothing here opens a connection, so these
    /// tests exercise routing and the pre-database middleware checks only.
    fn test_router() -> Router {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost:1/unused")
            .unwrap();
        app_router(AppState {
            pool,
            session_ttl_hours: 1,
        })
    }

    async fn status_of(path: &str) -> StatusCode {
        let response = test_router()
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        response.status()
    }

    /// Unauthenticated requests to wired admin routes stop at the auth
    /// middleware (401) before any database access; an unknown path falls
    /// through to the router's 404.
    #[tokio::test]
    async fn admin_category_listing_is_routed() {
        assert_eq!(status_of("/api/admin/categories").await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn admin_group_covers_every_content_listing() {
        for path in [
            "/api/admin/services",
            "/api/admin/portfolio",
            "/api/admin/testimonials",
            "/api/admin/faqs",
            "/api/admin/orders",
            "/api/admin/payments",
            "/api/admin/expenses",
            "/api/admin/transfers",
            "/api/admin/finance/stats",
            "/api/admin/users",
            "/api/admin/settings",
        ] {
            assert_eq!(status_of(path).await, StatusCode::UNAUTHORIZED, "{}", path);
        }
    }

    #[tokio::test]
    async fn unknown_paths_fall_through_to_404() {
        assert_eq!(status_of("/api/admin/unknown").await, StatusCode::NOT_FOUND);
    }
}
