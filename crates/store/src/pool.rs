//! Postgres connection pool.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use nodes::StoreError;

/// Type alias for the shared Postgres pool.
pub type DbPool = PgPool;

/// Create a new connection pool from the given `database_url`.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, StoreError> {
    info!("Connecting to database (max_connections={max_connections})");
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))
}

/// Run embedded migrations located in `./migrations` (relative to the
/// workspace root at build time).
pub async fn run_migrations(pool: &DbPool) -> Result<(), StoreError> {
    info!("Running database migrations");
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))
}
