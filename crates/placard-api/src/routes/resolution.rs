//! # Resolution Endpoint
//!
//! `POST /v1/resolution` resolves the regulatory authorities for one
//! street address. Resolution itself never fails: coverage gaps come back
//! as an empty match list and backend outages as soft failures. When the
//! caller names a location, the resolved links are persisted on a
//! detached task so the response never waits on the write path.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use placard_core::{Address, LocationId, ValidationError};
use placard_resolve::{JurisdictionMatch, JurisdictionResolver, LayerFailure};

use crate::error::AppError;
use crate::state::AppState;

/// Request to resolve an address.
#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    /// Known location to persist the resolved links for, if any.
    pub location_id: Option<Uuid>,
    /// The address to resolve.
    pub address: Address,
}

impl ResolveRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("street", &self.address.street),
            ("city", &self.address.city),
            ("county", &self.address.county),
            ("state", &self.address.state),
            ("zip", &self.address.zip),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::EmptyField(field));
            }
        }
        Ok(())
    }
}

/// Resolution response.
#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    /// Matches across all layers.
    pub matches: Vec<JurisdictionMatch>,
    /// Layers that could not be resolved this time.
    pub soft_failures: Vec<LayerFailure>,
    /// True when no authority at all was found for the address.
    pub not_covered: bool,
}

/// Build the resolution router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/resolution", post(resolve))
}

/// `POST /v1/resolution` — resolve all jurisdiction layers for an address.
async fn resolve(
    State(state): State<AppState>,
    Json(request): Json<ResolveRequest>,
) -> Result<Json<ResolveResponse>, AppError> {
    request.validate()?;

    let resolution = state.resolver.resolve(&request.address).await;

    if let Some(location_id) = request.location_id {
        // Fire and forget; link failures are logged on the task.
        let _ = JurisdictionResolver::link_in_background(
            state.link.clone(),
            LocationId::from_uuid(location_id),
            &resolution,
        );
    }

    let not_covered = !resolution.is_covered();
    Ok(Json(ResolveResponse {
        matches: resolution.matches,
        soft_failures: resolution.soft_failures,
        not_covered,
    }))
}
