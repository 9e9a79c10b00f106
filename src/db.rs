//! Database connection pool, migrations, and shared application state.

use sqlx::{Pool, Postgres};

/// Type alias for the PostgreSQL connection pool.
pub type DbPool = Pool<Postgres>;

/// Shared state injected into every handler via axum's `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection pool, cheap to clone (internally Arc'd).
    pub pool: DbPool,

    /// How long issued sessions remain valid.
    pub session_ttl_hours: i64,
}

/// Create a new PostgreSQL connection pool.
///
/// A connection pool maintains multiple database connections that are reused
/// across HTTP requests, which is much more efficient than opening a new
/// connection for each request.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection string is invalid
/// - Cannot connect to PostgreSQL server
/// - Database authentication fails
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    sqlx::postgres::PgPoolOptions::new()
        // Limit concurrent connections
        .max_connections(5)
        .connect(database_url)
        .await
}

/// Run database migrations from the `migrations/` directory.
///
/// Migrations are tracked in the `_sqlx_migrations` table, so each migration
/// runs only once.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    // The macro embeds migrations at compile time from ./migrations
    sqlx::migrate!("./migrations").run(pool).await
}
