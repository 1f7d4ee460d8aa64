//! Jurisdiction catalog backed by the `jurisdictions` table.
//!
//! Rows store the grading schema and pillar weights as JSONB. A row whose
//! schema fails to decode or validate is a malformed record: resolution
//! must not proceed against a schema the scorer cannot classify with, so
//! the error surfaces instead of being papered over.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use placard_core::{GradingSchema, Jurisdiction, JurisdictionId, JurisdictionType, PillarWeights};
use placard_resolve::{CatalogError, CityFilter, JurisdictionCatalog, JurisdictionFilter};

/// Postgres-backed [`JurisdictionCatalog`].
#[derive(Debug, Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    /// Wrap a connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_COLUMNS: &str = "SELECT id, state, county, city, jurisdiction_type, agency_name, \
     grading_schema, weights, fire_authority, is_active FROM jurisdictions";

#[async_trait]
impl JurisdictionCatalog for PgCatalog {
    async fn find_jurisdictions(
        &self,
        filter: &JurisdictionFilter,
    ) -> Result<Vec<Jurisdiction>, CatalogError> {
        let types: Vec<String> = filter
            .jurisdiction_types
            .iter()
            .map(type_to_str)
            .map(str::to_string)
            .collect();

        // Three statements instead of one dynamically assembled string;
        // the city clause is the only part that varies.
        let rows = match &filter.city {
            CityFilter::Exact(city) => {
                sqlx::query_as::<_, JurisdictionRow>(&format!(
                    "{SELECT_COLUMNS} \
                     WHERE state = $1 AND county = $2 AND lower(city) = lower($3) \
                       AND jurisdiction_type = ANY($4) AND (is_active OR NOT $5)"
                ))
                .bind(&filter.state)
                .bind(&filter.county)
                .bind(city)
                .bind(&types)
                .bind(filter.active_only)
                .fetch_all(&self.pool)
                .await
            }
            CityFilter::CountyWide => {
                sqlx::query_as::<_, JurisdictionRow>(&format!(
                    "{SELECT_COLUMNS} \
                     WHERE state = $1 AND county = $2 AND city IS NULL \
                       AND jurisdiction_type = ANY($3) AND (is_active OR NOT $4)"
                ))
                .bind(&filter.state)
                .bind(&filter.county)
                .bind(&types)
                .bind(filter.active_only)
                .fetch_all(&self.pool)
                .await
            }
            CityFilter::Any => {
                sqlx::query_as::<_, JurisdictionRow>(&format!(
                    "{SELECT_COLUMNS} \
                     WHERE state = $1 AND county = $2 \
                       AND jurisdiction_type = ANY($3) AND (is_active OR NOT $4)"
                ))
                .bind(&filter.state)
                .bind(&filter.county)
                .bind(&types)
                .bind(filter.active_only)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| CatalogError::Backend(e.to_string()))?;

        rows.into_iter().map(JurisdictionRow::into_record).collect()
    }
}

fn type_to_str(jurisdiction_type: &JurisdictionType) -> &'static str {
    match jurisdiction_type {
        JurisdictionType::FoodSafety => "food_safety",
        JurisdictionType::FacilitySafety => "facility_safety",
        JurisdictionType::Both => "both",
    }
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct JurisdictionRow {
    id: Uuid,
    state: String,
    county: String,
    city: Option<String>,
    jurisdiction_type: String,
    agency_name: String,
    grading_schema: serde_json::Value,
    weights: Option<serde_json::Value>,
    fire_authority: String,
    is_active: bool,
}

impl JurisdictionRow {
    fn into_record(self) -> Result<Jurisdiction, CatalogError> {
        let jurisdiction_type: JurisdictionType =
            serde_json::from_value(serde_json::Value::String(self.jurisdiction_type.clone()))
                .map_err(|e| {
                    CatalogError::Malformed(format!(
                        "jurisdiction {}: unknown type '{}': {e}",
                        self.id, self.jurisdiction_type
                    ))
                })?;

        let grading_schema: GradingSchema =
            serde_json::from_value(self.grading_schema).map_err(|e| {
                CatalogError::Malformed(format!("jurisdiction {}: grading schema: {e}", self.id))
            })?;
        grading_schema.validate().map_err(|e| {
            CatalogError::Malformed(format!("jurisdiction {}: grading schema: {e}", self.id))
        })?;

        let weights: Option<PillarWeights> = match self.weights {
            Some(value) => Some(serde_json::from_value(value).map_err(|e| {
                CatalogError::Malformed(format!("jurisdiction {}: weights: {e}", self.id))
            })?),
            None => None,
        };

        Ok(Jurisdiction {
            id: JurisdictionId::from_uuid(self.id),
            state: self.state,
            county: self.county,
            city: self.city,
            jurisdiction_type,
            agency_name: self.agency_name,
            grading_schema,
            weights,
            fire_authority: self.fire_authority,
            is_active: self.is_active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_strings_match_the_serde_form() {
        for t in [
            JurisdictionType::FoodSafety,
            JurisdictionType::FacilitySafety,
            JurisdictionType::Both,
        ] {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", type_to_str(&t)));
        }
    }

    #[test]
    fn malformed_schema_row_is_rejected() {
        let row = JurisdictionRow {
            id: Uuid::new_v4(),
            state: "CA".to_string(),
            county: "Fresno".to_string(),
            city: None,
            jurisdiction_type: "food_safety".to_string(),
            agency_name: "Fresno County Environmental Health".to_string(),
            grading_schema: serde_json::json!({"type": "star_rating"}),
            weights: None,
            fire_authority: "Fresno Fire".to_string(),
            is_active: true,
        };
        let err = row.into_record().unwrap_err();
        assert!(matches!(err, CatalogError::Malformed(_)));
    }

    #[test]
    fn unknown_jurisdiction_type_is_rejected() {
        let row = JurisdictionRow {
            id: Uuid::new_v4(),
            state: "CA".to_string(),
            county: "Fresno".to_string(),
            city: None,
            jurisdiction_type: "zoning".to_string(),
            agency_name: "Fresno County Environmental Health".to_string(),
            grading_schema: serde_json::json!({"type": "pass_fail"}),
            weights: None,
            fire_authority: "Fresno Fire".to_string(),
            is_active: true,
        };
        let err = row.into_record().unwrap_err();
        assert!(matches!(err, CatalogError::Malformed(_)));
    }
}
