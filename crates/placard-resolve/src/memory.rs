//! # In-Memory Catalog and Link Store
//!
//! Reference implementations of the storage traits, used by tests across
//! the workspace and suitable for demo deployments with a fixed catalog.
//! Records are validated on insert, matching the load-time gate a real
//! backend applies.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use placard_core::{ConfigError, Jurisdiction, JurisdictionId, Layer, LocationId};

use crate::catalog::{
    CatalogError, CityFilter, JurisdictionCatalog, JurisdictionFilter, LinkError,
    LocationJurisdictionLink,
};

/// An in-memory jurisdiction catalog.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    records: RwLock<Vec<Jurisdiction>>,
    queries: AtomicUsize,
}

impl InMemoryCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and insert a record. Invalid records are refused, exactly
    /// as a database-backed catalog refuses them at load time.
    pub fn insert(&self, record: Jurisdiction) -> Result<(), ConfigError> {
        record.validate()?;
        self.records.write().push(record);
        Ok(())
    }

    /// Number of queries served since construction.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }

    fn matches(record: &Jurisdiction, filter: &JurisdictionFilter) -> bool {
        if filter.active_only && !record.is_active {
            return false;
        }
        if !record.state.eq_ignore_ascii_case(&filter.state) {
            return false;
        }
        if !record.county.eq_ignore_ascii_case(&filter.county) {
            return false;
        }
        let city_ok = match &filter.city {
            CityFilter::Exact(city) => record
                .city
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(city)),
            CityFilter::CountyWide => record.city.is_none(),
            CityFilter::Any => true,
        };
        city_ok
            && filter
                .jurisdiction_types
                .contains(&record.jurisdiction_type)
    }
}

#[async_trait]
impl JurisdictionCatalog for InMemoryCatalog {
    async fn find_jurisdictions(
        &self,
        filter: &JurisdictionFilter,
    ) -> Result<Vec<Jurisdiction>, CatalogError> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        Ok(self
            .records
            .read()
            .iter()
            .filter(|record| Self::matches(record, filter))
            .cloned()
            .collect())
    }
}

/// One stored location-jurisdiction association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    /// The linked location.
    pub location_id: LocationId,
    /// The linked jurisdiction.
    pub jurisdiction_id: JurisdictionId,
    /// The layer the association lives on.
    pub layer: Layer,
    /// Whether this association drives the facility's grade.
    pub is_most_restrictive: bool,
}

/// An in-memory link store, keyed like the database table: one row per
/// `(location, jurisdiction, layer)`.
#[derive(Debug, Default)]
pub struct InMemoryLink {
    rows: RwLock<HashMap<(LocationId, JurisdictionId, Layer), bool>>,
}

impl InMemoryLink {
    /// An empty link store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all stored associations, in no particular order.
    pub fn records(&self) -> Vec<LinkRecord> {
        self.rows
            .read()
            .iter()
            .map(
                |(&(location_id, jurisdiction_id, layer), &is_most_restrictive)| LinkRecord {
                    location_id,
                    jurisdiction_id,
                    layer,
                    is_most_restrictive,
                },
            )
            .collect()
    }
}

#[async_trait]
impl LocationJurisdictionLink for InMemoryLink {
    async fn upsert(
        &self,
        location_id: LocationId,
        jurisdiction_id: JurisdictionId,
        layer: Layer,
        is_most_restrictive: bool,
    ) -> Result<(), LinkError> {
        self.rows
            .write()
            .insert((location_id, jurisdiction_id, layer), is_most_restrictive);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use placard_core::{GradingSchema, JurisdictionType};

    fn county_record(county: &str, city: Option<&str>) -> Jurisdiction {
        Jurisdiction {
            id: JurisdictionId::new(),
            state: "CA".to_string(),
            county: county.to_string(),
            city: city.map(str::to_string),
            jurisdiction_type: JurisdictionType::FoodSafety,
            agency_name: format!("{county} Environmental Health"),
            grading_schema: GradingSchema::PassFail,
            weights: None,
            fire_authority: format!("{county} Fire"),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn exact_city_filter_excludes_county_wide_records() {
        let catalog = InMemoryCatalog::new();
        catalog.insert(county_record("Los Angeles", None)).unwrap();
        catalog
            .insert(county_record("Los Angeles", Some("Long Beach")))
            .unwrap();

        let filter = JurisdictionFilter {
            state: "CA".to_string(),
            county: "Los Angeles".to_string(),
            city: CityFilter::Exact("Long Beach".to_string()),
            jurisdiction_types: vec![JurisdictionType::FoodSafety],
            active_only: true,
        };
        let found = catalog.find_jurisdictions(&filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].city.as_deref(), Some("Long Beach"));
    }

    #[tokio::test]
    async fn county_wide_filter_excludes_city_records() {
        let catalog = InMemoryCatalog::new();
        catalog.insert(county_record("Los Angeles", None)).unwrap();
        catalog
            .insert(county_record("Los Angeles", Some("Long Beach")))
            .unwrap();

        let filter = JurisdictionFilter {
            state: "CA".to_string(),
            county: "Los Angeles".to_string(),
            city: CityFilter::CountyWide,
            jurisdiction_types: vec![JurisdictionType::FoodSafety],
            active_only: true,
        };
        let found = catalog.find_jurisdictions(&filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].city.is_none());
    }

    #[tokio::test]
    async fn inactive_records_are_invisible_when_active_only() {
        let catalog = InMemoryCatalog::new();
        let mut record = county_record("Kern", None);
        record.is_active = false;
        catalog.insert(record).unwrap();

        let filter = JurisdictionFilter {
            state: "CA".to_string(),
            county: "Kern".to_string(),
            city: CityFilter::Any,
            jurisdiction_types: vec![JurisdictionType::FoodSafety],
            active_only: true,
        };
        assert!(catalog.find_jurisdictions(&filter).await.unwrap().is_empty());
    }

    #[test]
    fn insert_refuses_invalid_records() {
        let catalog = InMemoryCatalog::new();
        let mut record = county_record("Kern", None);
        record.grading_schema = GradingSchema::NumericScore {
            min: 10.0,
            max: 5.0,
            warning: None,
            critical: None,
        };
        assert!(catalog.insert(record).is_err());
    }

    #[tokio::test]
    async fn link_upsert_is_idempotent_and_refreshes_the_flag() {
        let link = InMemoryLink::new();
        let location = LocationId::new();
        let jurisdiction = JurisdictionId::new();

        link.upsert(location, jurisdiction, Layer::FoodPrimary, false)
            .await
            .unwrap();
        link.upsert(location, jurisdiction, Layer::FoodPrimary, true)
            .await
            .unwrap();

        let records = link.records();
        assert_eq!(records.len(), 1);
        assert!(records[0].is_most_restrictive);
    }
}
