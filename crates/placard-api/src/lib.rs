#![deny(missing_docs)]

//! # placard-api — HTTP API for the Placard Compliance Engine
//!
//! Serves jurisdiction resolution to the product and the regulatory
//! change review console to the editorial team.
//!
//! ## API Surface
//!
//! | Route                    | Module                  | Domain                |
//! |--------------------------|-------------------------|-----------------------|
//! | `POST /v1/resolution`    | [`routes::resolution`]  | Jurisdiction lookup   |
//! | `POST /v1/admin/changes` | [`routes::admin`]       | Change review console |
//! | `GET /health/*`          | (unauthenticated)       | Probes                |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → AuthMiddleware → Handler
//! ```
//!
//! Health probes are mounted outside the auth middleware so they remain
//! accessible without credentials.

pub mod auth;
pub mod changes;
pub mod db;
pub mod error;
pub mod routes;
pub mod state;

use axum::middleware::from_fn;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::auth::AuthConfig;
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let auth_config = AuthConfig {
        secret: state.config.auth_secret.clone(),
    };

    // Authenticated API routes.
    let api = Router::new()
        .merge(routes::resolution::router())
        .merge(routes::admin::router())
        .layer(from_fn(auth::auth_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(axum::Extension(auth_config))
        .with_state(state);

    // Unauthenticated health probes.
    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — returns 200 when the application is ready to serve.
async fn readiness() -> &'static str {
    "ready"
}
