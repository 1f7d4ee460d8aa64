//! # Jurisdiction Records
//!
//! The catalog record for one regulatory authority: where it has
//! jurisdiction, what it regulates, and how it grades. Records are
//! validated once at load; anything that passes [`Jurisdiction::validate`]
//! can be interpreted downstream without re-checking.

use serde::{Deserialize, Serialize};

use crate::address::JurisdictionType;
use crate::error::ConfigError;
use crate::grading::GradingSchema;
use crate::identity::JurisdictionId;
use crate::weights::PillarWeights;

/// One regulatory jurisdiction in the catalog.
///
/// `city` is `None` for county-wide authorities. A city-specific record
/// always beats the county-wide record for the same county during
/// resolution (Long Beach runs its own health department inside Los
/// Angeles County; a Long Beach address must resolve to Long Beach, never
/// to the county).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Jurisdiction {
    /// Unique record identifier.
    pub id: JurisdictionId,
    /// Two-letter state code, e.g. "CA".
    pub state: String,
    /// Normalized county name without the "County" suffix.
    pub county: String,
    /// City name for city-specific authorities, `None` for county-wide.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// What this authority regulates.
    pub jurisdiction_type: JurisdictionType,
    /// Display name of the agency, e.g. "Long Beach Environmental Health".
    pub agency_name: String,
    /// How this authority grades inspections.
    pub grading_schema: GradingSchema,
    /// Published pillar weights, when the authority defines its own blend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<PillarWeights>,
    /// Name of the fire authority covering this area.
    pub fire_authority: String,
    /// Inactive records are retained for history but never matched.
    pub is_active: bool,
}

impl Jurisdiction {
    /// Validate the record's grading schema and weight profile.
    ///
    /// Load-time gate: a record failing here never enters the catalog, so
    /// resolution and scoring can trust every record they see.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grading_schema.validate()?;
        if let Some(weights) = &self.weights {
            weights.validate()?;
        }
        Ok(())
    }
}
