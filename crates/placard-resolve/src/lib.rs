#![deny(missing_docs)]

//! # placard-resolve — Jurisdiction Resolution
//!
//! Maps a geocoded facility address to the set of regulatory authorities
//! with jurisdiction over it, across three independent layers:
//!
//! | Layer             | Authority                                    |
//! |-------------------|----------------------------------------------|
//! | `food_primary`    | Health department (city-specific beats county) |
//! | `fire_primary`    | Fire marshal / facility-safety authority     |
//! | `federal_overlay` | Federal authority stacked on top (NPS parks) |
//!
//! Layers never merge and never mask one another. A partial catalog outage
//! degrades the resolution to the healthy layers and reports the failed
//! ones as [`LayerFailure`] entries; it never aborts the whole resolution.
//!
//! Storage is behind the [`JurisdictionCatalog`] and
//! [`LocationJurisdictionLink`] traits so the resolver is testable without
//! a database and reusable over any backend.

pub mod catalog;
pub mod memory;
pub mod normalize;
pub mod overlay;
pub mod policy;
pub mod resolver;

pub use catalog::{
    CatalogError, CityFilter, JurisdictionCatalog, JurisdictionFilter, LinkError,
    LocationJurisdictionLink,
};
pub use memory::{InMemoryCatalog, InMemoryLink};
pub use normalize::{AddressNormalizer, CaNormalizer, NormalizedAddress};
pub use overlay::{OverlayRegistry, OverlayRule};
pub use policy::{FoodPrimaryPolicy, RestrictivenessPolicy};
pub use resolver::{JurisdictionMatch, JurisdictionResolver, LayerFailure, Resolution};
