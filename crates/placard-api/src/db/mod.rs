//! # Database Persistence Layer
//!
//! Postgres persistence via SQLx. The database is **optional**: when
//! `DATABASE_URL` is set, the API reads the jurisdiction catalog from
//! Postgres and persists location links and regulatory changes. When
//! absent, the API runs on the in-memory stores (development and tests).
//!
//! ## Tables
//!
//! - `jurisdictions` — the catalog, read by [`catalog::PgCatalog`]
//! - `location_jurisdictions` — resolved links, written by [`link::PgLink`]
//! - `regulatory_changes` — review queue, owned by [`changes::PgChangeStore`]

pub mod catalog;
pub mod changes;
pub mod link;

use sqlx::postgres::{PgPool, PgPoolOptions};

/// Initialize the database connection pool and run migrations.
///
/// Returns `None` if `DATABASE_URL` is not set (in-memory-only mode).
/// Returns `Err` if the URL is set but the connection or migration fails.
pub async fn init_pool() -> Result<Option<PgPool>, sqlx::Error> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!(
                "DATABASE_URL not set — running in-memory only mode. \
                 State will not survive restarts."
            );
            return Ok(None);
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .min_connections(2)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect(&url)
        .await?;

    tracing::info!("Connected to PostgreSQL");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(Some(pool))
}
