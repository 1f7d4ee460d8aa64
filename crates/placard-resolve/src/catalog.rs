//! # Catalog and Link Traits
//!
//! The storage seam for resolution. The resolver reads through
//! [`JurisdictionCatalog`] and writes (asynchronously, never on the request
//! path) through [`LocationJurisdictionLink`]. Both are object-safe so an
//! application can hold them behind `Arc<dyn ...>`.

use async_trait::async_trait;
use thiserror::Error;

use placard_core::{Jurisdiction, JurisdictionId, JurisdictionType, Layer, LocationId};

/// How to match the city column of a jurisdiction record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CityFilter {
    /// Match records for exactly this city.
    Exact(String),
    /// Match only county-wide records (city unset).
    CountyWide,
    /// City is irrelevant for this lookup.
    Any,
}

/// A catalog query. Every field is an AND condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JurisdictionFilter {
    /// Two-letter state code.
    pub state: String,
    /// Normalized county name (no "County" suffix).
    pub county: String,
    /// City matching mode.
    pub city: CityFilter,
    /// Acceptable jurisdiction types (OR within this field).
    pub jurisdiction_types: Vec<JurisdictionType>,
    /// Restrict to active records.
    pub active_only: bool,
}

/// Errors surfaced by a catalog backend.
///
/// The resolver treats these as soft failures: the failing layer is
/// reported, the others still resolve.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The backend could not be reached or the query failed.
    #[error("catalog backend error: {0}")]
    Backend(String),

    /// A stored record failed to decode into a [`Jurisdiction`].
    #[error("catalog returned a malformed record: {0}")]
    Malformed(String),
}

impl CatalogError {
    /// Stable machine-readable code for API responses. The full error text
    /// stays in the logs.
    pub fn reason_code(&self) -> &'static str {
        match self {
            CatalogError::Backend(_) => "catalog_unavailable",
            CatalogError::Malformed(_) => "catalog_record_malformed",
        }
    }
}

/// Read access to jurisdiction records.
#[async_trait]
pub trait JurisdictionCatalog: Send + Sync {
    /// Return all records matching the filter. Order is backend-defined;
    /// the resolver takes the first match per layer.
    async fn find_jurisdictions(
        &self,
        filter: &JurisdictionFilter,
    ) -> Result<Vec<Jurisdiction>, CatalogError>;
}

/// Errors surfaced by the link store.
#[derive(Error, Debug)]
pub enum LinkError {
    /// The backend could not be reached or the write failed.
    #[error("link backend error: {0}")]
    Backend(String),
}

/// Write access to location-jurisdiction associations.
///
/// `upsert` is keyed on `(location, jurisdiction, layer)`: re-resolving the
/// same address is idempotent and refreshes the restrictiveness flag
/// instead of duplicating the link.
#[async_trait]
pub trait LocationJurisdictionLink: Send + Sync {
    /// Insert or refresh one association.
    async fn upsert(
        &self,
        location_id: LocationId,
        jurisdiction_id: JurisdictionId,
        layer: Layer,
        is_most_restrictive: bool,
    ) -> Result<(), LinkError>;
}
