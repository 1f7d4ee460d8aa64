//! # Pillar Weight Profiles
//!
//! Jurisdictions weight the compliance pillars differently when blending a
//! composite score. A profile that does not sum to 1.0 is a configuration
//! bug, and the engine refuses to renormalize it silently — a quiet rescale
//! would hide the bad record until an auditor asked why the numbers don't
//! add up.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tolerance band for the blended weight sum.
const WEIGHT_SUM_MIN: f64 = 0.999;
const WEIGHT_SUM_MAX: f64 = 1.001;

/// Per-jurisdiction pillar weights for composite scoring.
///
/// Only `food_safety`, `operations`, and `documentation` participate in the
/// blend. `facility_safety` is carried on the profile because some
/// authorities publish one, but no blended formula consumes it yet; it is
/// deliberately excluded from the sum check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PillarWeights {
    /// Weight of the food-safety pillar (temperature logs).
    pub food_safety: f64,
    /// Weight of the operations pillar (checklists).
    pub operations: f64,
    /// Weight of the documentation pillar (certificate currency).
    pub documentation: f64,
    /// Published but unblended facility-safety weight, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facility_safety: Option<f64>,
}

impl PillarWeights {
    /// Validate that the blended weights are individually sane and sum to
    /// 1.0 within `[0.999, 1.001]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (pillar, value) in [
            ("food_safety", self.food_safety),
            ("operations", self.operations),
            ("documentation", self.documentation),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { pillar, value });
            }
        }
        if let Some(value) = self.facility_safety {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight {
                    pillar: "facility_safety",
                    value,
                });
            }
        }
        let sum = self.food_safety + self.operations + self.documentation;
        if !(WEIGHT_SUM_MIN..=WEIGHT_SUM_MAX).contains(&sum) {
            return Err(ConfigError::WeightSum { sum });
        }
        Ok(())
    }
}

impl Default for PillarWeights {
    /// The standard profile used when a jurisdiction publishes no weights.
    fn default() -> Self {
        Self {
            food_safety: 0.45,
            operations: 0.30,
            documentation: 0.25,
            facility_safety: None,
        }
    }
}
