//! # Application State
//!
//! Shared state handed to every route handler. The resolver, the link
//! store, and the change store all sit behind trait objects so tests can
//! swap the Postgres backends for the in-memory ones.

use std::sync::Arc;

use placard_resolve::{JurisdictionResolver, LocationJurisdictionLink};

use crate::changes::ChangeStore;

/// Application configuration, built from the environment in `main`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind.
    pub port: u16,
    /// Shared token secret. `None` disables auth (development mode).
    pub auth_secret: Option<String>,
    /// Email domain whose accounts may use the admin console.
    pub admin_domain: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            auth_secret: None,
            admin_domain: "placardhq.com".to_string(),
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Three-layer jurisdiction resolver.
    pub resolver: Arc<JurisdictionResolver>,
    /// Location-to-jurisdiction link store, written on a background task.
    pub link: Arc<dyn LocationJurisdictionLink>,
    /// Regulatory change review store.
    pub changes: Arc<dyn ChangeStore>,
    /// Configuration.
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Assemble the state from its parts.
    pub fn new(
        resolver: JurisdictionResolver,
        link: Arc<dyn LocationJurisdictionLink>,
        changes: Arc<dyn ChangeStore>,
        config: AppConfig,
    ) -> Self {
        Self {
            resolver: Arc::new(resolver),
            link,
            changes,
            config: Arc::new(config),
        }
    }
}
