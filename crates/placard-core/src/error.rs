//! # Error Hierarchy
//!
//! Structured error types for the compliance engine, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Two families:
//!
//! - [`ValidationError`] — a caller handed us a malformed value (bad pillar
//!   input, empty field). Recoverable; maps to a 4xx at the API edge.
//! - [`ConfigError`] — a jurisdiction record or weight profile is
//!   internally inconsistent. These are load-time hard failures: a record
//!   that fails validation never reaches the resolver or the scorer.

use thiserror::Error;

/// Validation errors for caller-supplied values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required string field was empty after trimming.
    #[error("field \"{0}\" must be non-empty")]
    EmptyField(&'static str),

    /// A pillar input was outside the unit interval.
    #[error("pillar input \"{pillar}\" must be within [0, 1], got {value}")]
    PillarOutOfRange {
        /// Which pillar carried the bad value.
        pillar: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// Configuration errors in jurisdiction records and weight profiles.
///
/// Every variant carries enough context to identify the offending record
/// without a debugger. Configuration is validated once at load; none of
/// these can surface during classification or scoring.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Blended pillar weights do not sum to 1.0 within tolerance.
    /// Weights are never silently renormalized.
    #[error("pillar weights sum to {sum}, expected 1.0 within [0.999, 1.001]")]
    WeightSum {
        /// The actual sum of the blended weights.
        sum: f64,
    },

    /// A single weight was negative or non-finite.
    #[error("pillar weight \"{pillar}\" is invalid: {value}")]
    InvalidWeight {
        /// Which pillar carried the bad weight.
        pillar: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A grading schema's parameters are internally inconsistent.
    #[error("invalid grading schema: {0}")]
    InvalidSchema(String),

    /// A schema references a bracket, color, or tier label it does not define.
    #[error("grading schema references undefined label \"{0}\"")]
    UndefinedLabel(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_sum_display_carries_sum() {
        let err = ConfigError::WeightSum { sum: 0.9 };
        let msg = format!("{err}");
        assert!(msg.contains("0.9"));
        assert!(msg.contains("1.0"));
    }

    #[test]
    fn invalid_schema_display() {
        let err = ConfigError::InvalidSchema("brackets overlap".to_string());
        assert!(format!("{err}").contains("brackets overlap"));
    }

    #[test]
    fn undefined_label_display() {
        let err = ConfigError::UndefinedLabel("Z".to_string());
        assert!(format!("{err}").contains("\"Z\""));
    }

    #[test]
    fn pillar_out_of_range_display() {
        let err = ValidationError::PillarOutOfRange {
            pillar: "food_safety",
            value: 1.2,
        };
        let msg = format!("{err}");
        assert!(msg.contains("food_safety"));
        assert!(msg.contains("1.2"));
    }

    #[test]
    fn empty_field_display() {
        let err = ValidationError::EmptyField("county");
        assert!(format!("{err}").contains("county"));
    }
}
