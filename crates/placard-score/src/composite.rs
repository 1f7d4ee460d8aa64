//! # Composite Compliance Scoring
//!
//! Blends the three compliance pillars into a single 0–100 score:
//!
//! ```text
//! composite = 100 * (w_food * temp_log_pass_rate
//!                  + w_ops  * checklist_score
//!                  + w_docs * doc_currency)
//! ```
//!
//! Weights come from the jurisdiction when it publishes a profile,
//! otherwise the standard 0.45 / 0.30 / 0.25 split. A profile that fails
//! validation is a hard error; the blend never silently renormalizes.
//!
//! The composite is then graded through the food-safety jurisdiction's own
//! `NumericScore` schema when it has one, so the number on the dashboard
//! agrees with the number the inspector would post. Jurisdictions without
//! a numeric schema fall back to the built-in scale.

use serde::{Deserialize, Serialize};

use placard_core::{ConfigError, GradingSchema, NormalizedStatus, PillarWeights, ValidationError};

use crate::classify::{classify, Classification, RawGrade};

/// Built-in fallback scale: pass at or above this composite value.
const DEFAULT_PASS_FLOOR: f64 = 80.0;
/// Built-in fallback scale: warning at or above this composite value.
const DEFAULT_WARNING_FLOOR: f64 = 60.0;

/// The three pillar inputs, each a rate in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplianceInputs {
    /// Share of temperature log readings in range.
    pub temp_log_pass_rate: f64,
    /// Share of operational checklists fully passed.
    pub checklist_score: f64,
    /// Share of required documents current (not expired).
    pub doc_currency: f64,
}

impl ComplianceInputs {
    /// Build validated inputs. Each rate must be a finite value in `[0, 1]`.
    pub fn new(
        temp_log_pass_rate: f64,
        checklist_score: f64,
        doc_currency: f64,
    ) -> Result<Self, ValidationError> {
        for (pillar, value) in [
            ("food_safety", temp_log_pass_rate),
            ("operations", checklist_score),
            ("documentation", doc_currency),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::PillarOutOfRange { pillar, value });
            }
        }
        Ok(Self {
            temp_log_pass_rate,
            checklist_score,
            doc_currency,
        })
    }
}

/// One pillar's contribution to the composite, for score breakdowns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PillarContribution {
    /// Pillar name.
    pub pillar: &'static str,
    /// The validated input rate.
    pub input: f64,
    /// The weight applied.
    pub weight: f64,
    /// `100 * weight * input`.
    pub points: f64,
}

/// A blended composite score with its breakdown and classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeScore {
    /// The 0–100 composite value.
    pub value: f64,
    /// Per-pillar contributions, food / operations / documentation.
    pub breakdown: [PillarContribution; 3],
    /// The composite graded under the food jurisdiction's numeric schema
    /// or the built-in scale.
    pub classification: Classification,
}

/// Grade a composite value.
///
/// Uses the food-safety jurisdiction's schema when it is a `NumericScore`;
/// any other schema (or none) falls back to the built-in scale, because a
/// letter-grade or placard schema says nothing about a 0–100 composite.
pub fn classify_composite(value: f64, food_schema: Option<&GradingSchema>) -> Classification {
    if let Some(schema @ GradingSchema::NumericScore { .. }) = food_schema {
        return classify(schema, &RawGrade::Score(value));
    }
    let status = if value >= DEFAULT_PASS_FLOOR {
        NormalizedStatus::Pass
    } else if value >= DEFAULT_WARNING_FLOOR {
        NormalizedStatus::Warning
    } else {
        NormalizedStatus::Fail
    };
    Classification {
        status,
        label: None,
        reason: None,
    }
}

/// Blend the pillars and grade the result.
///
/// `weights` is the jurisdiction's published profile; `None` uses the
/// default split. An invalid profile is a [`ConfigError`], never a silent
/// renormalization.
pub fn score(
    inputs: &ComplianceInputs,
    weights: Option<&PillarWeights>,
    food_schema: Option<&GradingSchema>,
) -> Result<CompositeScore, ConfigError> {
    let weights = weights.copied().unwrap_or_default();
    weights.validate()?;

    let breakdown = [
        PillarContribution {
            pillar: "food_safety",
            input: inputs.temp_log_pass_rate,
            weight: weights.food_safety,
            points: 100.0 * weights.food_safety * inputs.temp_log_pass_rate,
        },
        PillarContribution {
            pillar: "operations",
            input: inputs.checklist_score,
            weight: weights.operations,
            points: 100.0 * weights.operations * inputs.checklist_score,
        },
        PillarContribution {
            pillar: "documentation",
            input: inputs.doc_currency,
            weight: weights.documentation,
            points: 100.0 * weights.documentation * inputs.doc_currency,
        },
    ];
    let value = breakdown.iter().map(|c| c.points).sum();

    Ok(CompositeScore {
        value,
        classification: classify_composite(value, food_schema),
        breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn documented_example_blends_to_90_point_2() {
        let inputs = ComplianceInputs::new(0.96, 0.90, 0.80).unwrap();
        let result = score(&inputs, None, None).unwrap();
        assert!((result.value - 90.2).abs() < 1e-9);
        assert_eq!(result.classification.status, NormalizedStatus::Pass);
    }

    #[test]
    fn breakdown_sums_to_the_composite() {
        let inputs = ComplianceInputs::new(0.5, 0.75, 1.0).unwrap();
        let result = score(&inputs, None, None).unwrap();
        let sum: f64 = result.breakdown.iter().map(|c| c.points).sum();
        assert!((sum - result.value).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_input_is_rejected() {
        assert!(matches!(
            ComplianceInputs::new(1.2, 0.5, 0.5),
            Err(ValidationError::PillarOutOfRange {
                pillar: "food_safety",
                ..
            })
        ));
        assert!(ComplianceInputs::new(0.5, -0.1, 0.5).is_err());
        assert!(ComplianceInputs::new(0.5, 0.5, f64::NAN).is_err());
    }

    #[test]
    fn bad_jurisdiction_weights_are_a_hard_error() {
        let inputs = ComplianceInputs::new(1.0, 1.0, 1.0).unwrap();
        let weights = PillarWeights {
            food_safety: 0.5,
            operations: 0.5,
            documentation: 0.5,
            facility_safety: None,
        };
        assert!(matches!(
            score(&inputs, Some(&weights), None),
            Err(ConfigError::WeightSum { .. })
        ));
    }

    #[test]
    fn jurisdiction_weights_override_the_default() {
        let inputs = ComplianceInputs::new(1.0, 0.0, 0.0).unwrap();
        let weights = PillarWeights {
            food_safety: 0.6,
            operations: 0.2,
            documentation: 0.2,
            facility_safety: None,
        };
        let result = score(&inputs, Some(&weights), None).unwrap();
        assert!((result.value - 60.0).abs() < 1e-9);
    }

    #[test]
    fn default_scale_boundaries() {
        assert_eq!(
            classify_composite(80.0, None).status,
            NormalizedStatus::Pass
        );
        assert_eq!(
            classify_composite(79.9, None).status,
            NormalizedStatus::Warning
        );
        assert_eq!(
            classify_composite(60.0, None).status,
            NormalizedStatus::Warning
        );
        assert_eq!(
            classify_composite(59.9, None).status,
            NormalizedStatus::Fail
        );
    }

    #[test]
    fn numeric_schema_overrides_the_default_scale() {
        // A strict county: warning at 90, critical at 75. The same 85 that
        // passes the default scale is only a warning here.
        let schema = GradingSchema::NumericScore {
            min: 0.0,
            max: 100.0,
            warning: Some(90.0),
            critical: Some(75.0),
        };
        assert_eq!(
            classify_composite(85.0, Some(&schema)).status,
            NormalizedStatus::Warning
        );
        assert_eq!(
            classify_composite(85.0, None).status,
            NormalizedStatus::Pass
        );
    }

    #[test]
    fn non_numeric_schema_falls_back_to_the_default_scale() {
        let schema = GradingSchema::PassReinspect;
        assert_eq!(
            classify_composite(85.0, Some(&schema)).status,
            NormalizedStatus::Pass
        );
    }

    fn unit_rate() -> impl Strategy<Value = f64> {
        (0u32..=1000).prop_map(|n| f64::from(n) / 1000.0)
    }

    proptest! {
        /// Raising any single pillar input never lowers the composite.
        #[test]
        fn composite_is_monotone_in_each_pillar(
            food in unit_rate(),
            ops in unit_rate(),
            docs in unit_rate(),
            bump in unit_rate(),
        ) {
            let base = ComplianceInputs::new(food, ops, docs).unwrap();
            let base_value = score(&base, None, None).unwrap().value;

            let bumped_food = ComplianceInputs::new(
                (food + bump).min(1.0), ops, docs,
            ).unwrap();
            prop_assert!(score(&bumped_food, None, None).unwrap().value >= base_value - 1e-12);

            let bumped_ops = ComplianceInputs::new(
                food, (ops + bump).min(1.0), docs,
            ).unwrap();
            prop_assert!(score(&bumped_ops, None, None).unwrap().value >= base_value - 1e-12);

            let bumped_docs = ComplianceInputs::new(
                food, ops, (docs + bump).min(1.0),
            ).unwrap();
            prop_assert!(score(&bumped_docs, None, None).unwrap().value >= base_value - 1e-12);
        }

        /// The composite always lands in [0, 100].
        #[test]
        fn composite_is_bounded(
            food in unit_rate(),
            ops in unit_rate(),
            docs in unit_rate(),
        ) {
            let inputs = ComplianceInputs::new(food, ops, docs).unwrap();
            let value = score(&inputs, None, None).unwrap().value;
            prop_assert!((0.0..=100.0).contains(&value));
        }
    }
}
