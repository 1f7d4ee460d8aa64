//! # Three-Layer Jurisdiction Resolver
//!
//! Resolution walks three independent layers for one address:
//!
//! 1. **Food primary** — a city-specific health department wins over the
//!    county-wide one (Long Beach runs its own program inside Los Angeles
//!    County); falls back to the county record when no city record exists.
//! 2. **Fire primary** — the county's facility-safety authority, which may
//!    be an entirely different agency. Never merged with the food match.
//! 3. **Federal overlay** — in-memory [`OverlayRegistry`] rules; stacks on
//!    top of whatever the local layers produced.
//!
//! The food and facility lookups run concurrently. A layer whose catalog
//! query fails is reported as a [`LayerFailure`] and logged; the other
//! layers still resolve. Zero matches is a valid outcome ("not yet
//! covered"), not an error.

use std::sync::Arc;

use serde::Serialize;

use placard_core::{Address, Jurisdiction, JurisdictionType, Layer, LocationId};

use crate::catalog::{
    CatalogError, CityFilter, JurisdictionCatalog, JurisdictionFilter, LocationJurisdictionLink,
};
use crate::normalize::{AddressNormalizer, CaNormalizer, NormalizedAddress};
use crate::overlay::OverlayRegistry;
use crate::policy::{FoodPrimaryPolicy, RestrictivenessPolicy};

/// One resolved authority on one layer.
#[derive(Debug, Clone, Serialize)]
pub struct JurisdictionMatch {
    /// The matched jurisdiction record.
    pub jurisdiction: Jurisdiction,
    /// The layer this match occupies.
    pub layer: Layer,
    /// Whether this match drives the facility's grade. At most one match
    /// per resolution carries the flag.
    pub is_most_restrictive: bool,
}

/// A layer whose catalog lookup failed. The resolution still carries the
/// healthy layers.
#[derive(Debug, Clone, Serialize)]
pub struct LayerFailure {
    /// The layer that failed.
    pub layer: Layer,
    /// Stable reason code, e.g. `catalog_unavailable`. Raw backend errors
    /// stay in the logs.
    pub reason: String,
}

/// The outcome of resolving one address.
#[derive(Debug, Clone, Serialize, Default)]
pub struct Resolution {
    /// Matches across all layers, food first when present.
    pub matches: Vec<JurisdictionMatch>,
    /// Layers that could not be resolved.
    pub soft_failures: Vec<LayerFailure>,
}

impl Resolution {
    /// An empty resolution: no matches, no failures. Returned for
    /// addresses outside supported coverage.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether any authority was found for the address.
    pub fn is_covered(&self) -> bool {
        !self.matches.is_empty()
    }
}

/// The resolver. Holds the catalog, the normalization strategy, the
/// overlay rules, and the restrictiveness policy.
pub struct JurisdictionResolver {
    catalog: Arc<dyn JurisdictionCatalog>,
    normalizer: Box<dyn AddressNormalizer>,
    overlays: OverlayRegistry,
    policy: Box<dyn RestrictivenessPolicy>,
}

impl JurisdictionResolver {
    /// Build a resolver with the default California normalizer, no overlay
    /// rules, and the food-primary restrictiveness policy.
    pub fn new(catalog: Arc<dyn JurisdictionCatalog>) -> Self {
        Self {
            catalog,
            normalizer: Box::new(CaNormalizer),
            overlays: OverlayRegistry::empty(),
            policy: Box::new(FoodPrimaryPolicy),
        }
    }

    /// Replace the address normalizer.
    pub fn with_normalizer(mut self, normalizer: Box<dyn AddressNormalizer>) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Install federal overlay rules.
    pub fn with_overlays(mut self, overlays: OverlayRegistry) -> Self {
        self.overlays = overlays;
        self
    }

    /// Replace the restrictiveness policy.
    pub fn with_policy(mut self, policy: Box<dyn RestrictivenessPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Resolve all jurisdictions for one address.
    ///
    /// Infallible by design: coverage gaps and backend outages degrade the
    /// result instead of erroring. An unsupported state returns
    /// [`Resolution::empty`] without touching the catalog.
    pub async fn resolve(&self, address: &Address) -> Resolution {
        let Some(normalized) = self.normalizer.normalize(address) else {
            tracing::debug!(
                state = %address.state,
                "address outside supported coverage; empty resolution"
            );
            return Resolution::empty();
        };

        let (food, facility) = tokio::join!(
            self.food_layer(&normalized),
            self.facility_layer(&normalized)
        );

        let mut resolution = Resolution::empty();
        Self::collect_layer(&mut resolution, Layer::FoodPrimary, food);
        Self::collect_layer(&mut resolution, Layer::FirePrimary, facility);

        if let Some(federal) = self.overlays.check(&normalized) {
            resolution.matches.push(JurisdictionMatch {
                jurisdiction: federal.clone(),
                layer: Layer::FederalOverlay,
                is_most_restrictive: false,
            });
        }

        if let Some(index) = self.policy.pick(&resolution.matches) {
            resolution.matches[index].is_most_restrictive = true;
        }

        resolution
    }

    /// Persist a resolution's matches for a location on a detached task.
    ///
    /// The returned handle is for tests; production callers drop it. Link
    /// failures are logged on the background task and never reach the
    /// caller.
    pub fn link_in_background(
        link: Arc<dyn LocationJurisdictionLink>,
        location_id: LocationId,
        resolution: &Resolution,
    ) -> tokio::task::JoinHandle<()> {
        let targets: Vec<_> = resolution
            .matches
            .iter()
            .map(|m| (m.jurisdiction.id, m.layer, m.is_most_restrictive))
            .collect();
        tokio::spawn(async move {
            for (jurisdiction_id, layer, is_most_restrictive) in targets {
                if let Err(error) = link
                    .upsert(location_id, jurisdiction_id, layer, is_most_restrictive)
                    .await
                {
                    tracing::warn!(
                        %location_id,
                        jurisdiction_id = %jurisdiction_id,
                        layer = %layer,
                        %error,
                        "failed to link jurisdiction to location"
                    );
                }
            }
        })
    }

    fn collect_layer(
        resolution: &mut Resolution,
        layer: Layer,
        outcome: Result<Option<Jurisdiction>, CatalogError>,
    ) {
        match outcome {
            Ok(Some(jurisdiction)) => resolution.matches.push(JurisdictionMatch {
                jurisdiction,
                layer,
                is_most_restrictive: false,
            }),
            Ok(None) => {}
            Err(error) => {
                // Full error text goes to the log; the response body carries
                // only the stable code.
                tracing::warn!(layer = %layer, %error, "jurisdiction layer lookup failed");
                resolution.soft_failures.push(LayerFailure {
                    layer,
                    reason: error.reason_code().to_string(),
                });
            }
        }
    }

    /// City-specific food authority first, county-wide fallback second.
    async fn food_layer(
        &self,
        address: &NormalizedAddress,
    ) -> Result<Option<Jurisdiction>, CatalogError> {
        let city_filter = JurisdictionFilter {
            state: address.state.clone(),
            county: address.county.clone(),
            city: CityFilter::Exact(address.city.clone()),
            jurisdiction_types: vec![JurisdictionType::FoodSafety, JurisdictionType::Both],
            active_only: true,
        };
        if let Some(found) = self
            .catalog
            .find_jurisdictions(&city_filter)
            .await?
            .into_iter()
            .next()
        {
            return Ok(Some(found));
        }

        let county_filter = JurisdictionFilter {
            city: CityFilter::CountyWide,
            jurisdiction_types: vec![JurisdictionType::FoodSafety, JurisdictionType::Both],
            ..city_filter
        };
        Ok(self
            .catalog
            .find_jurisdictions(&county_filter)
            .await?
            .into_iter()
            .next())
    }

    async fn facility_layer(
        &self,
        address: &NormalizedAddress,
    ) -> Result<Option<Jurisdiction>, CatalogError> {
        let filter = JurisdictionFilter {
            state: address.state.clone(),
            county: address.county.clone(),
            city: CityFilter::Any,
            jurisdiction_types: vec![JurisdictionType::FacilitySafety, JurisdictionType::Both],
            active_only: true,
        };
        Ok(self
            .catalog
            .find_jurisdictions(&filter)
            .await?
            .into_iter()
            .next())
    }
}
