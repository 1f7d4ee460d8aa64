//! # placard-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the Placard compliance API.
//! Binds to a configurable port (default 8080).

use std::sync::Arc;

use placard_api::changes::InMemoryChangeStore;
use placard_api::db::catalog::PgCatalog;
use placard_api::db::changes::PgChangeStore;
use placard_api::db::link::PgLink;
use placard_api::state::{AppConfig, AppState};
use placard_resolve::{InMemoryCatalog, InMemoryLink, JurisdictionResolver};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Build configuration from environment.
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let auth_secret = std::env::var("AUTH_SECRET").ok();
    if auth_secret.is_none() {
        tracing::warn!("AUTH_SECRET not set — running with auth disabled");
    }
    let admin_domain =
        std::env::var("ADMIN_DOMAIN").unwrap_or_else(|_| "placardhq.com".to_string());

    let config = AppConfig {
        port,
        auth_secret,
        admin_domain,
    };

    // Initialize database pool (optional — absent means in-memory only).
    let db_pool = placard_api::db::init_pool().await.map_err(|e| {
        tracing::error!("Database initialization failed: {e}");
        e
    })?;

    let state = match db_pool {
        Some(pool) => AppState::new(
            JurisdictionResolver::new(Arc::new(PgCatalog::new(pool.clone()))),
            Arc::new(PgLink::new(pool.clone())),
            Arc::new(PgChangeStore::new(pool)),
            config,
        ),
        None => AppState::new(
            JurisdictionResolver::new(Arc::new(InMemoryCatalog::new())),
            Arc::new(InMemoryLink::new()),
            Arc::new(InMemoryChangeStore::new()),
            config,
        ),
    };

    let app = placard_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Placard API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
