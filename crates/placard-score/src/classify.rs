//! # Total Grade Classification
//!
//! Interprets a raw inspection value under a grading schema. Never panics,
//! never errors: a value the schema cannot interpret becomes
//! [`NormalizedStatus::Unclassified`] with a machine-readable reason, so
//! dashboards surface it instead of guessing.
//!
//! The match on [`GradingSchema`] is exhaustive. Adding a schema variant is
//! a compile error here until its interpretation is written.

use serde::{Deserialize, Serialize};

use placard_core::{GradingSchema, NormalizedStatus};

/// Reason code for values the schema does not define.
pub const REASON_UNRECOGNIZED: &str = "unrecognized_value";
/// Reason code for descriptive-only schemas.
pub const REASON_DESCRIPTIVE_ONLY: &str = "descriptive_only";

/// A raw inspection outcome as reported by the authority: either a numeric
/// score or a posted label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawGrade {
    /// A numeric score (letter-grade points, placard score, negative scale).
    Score(f64),
    /// A posted label ("A", "Green", "Pass", "Satisfactory").
    Label(String),
}

/// The interpreted outcome of one raw grade under one schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// The normalized status.
    pub status: NormalizedStatus,
    /// The display label under the jurisdiction's own system, when one
    /// applies ("C", "Green", "Reinspection Required").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Machine-readable reason when the status needs explaining
    /// (`unrecognized_value`, `descriptive_only`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Classification {
    fn new(status: NormalizedStatus, label: Option<String>) -> Self {
        Self {
            status,
            label,
            reason: None,
        }
    }

    fn unrecognized() -> Self {
        Self {
            status: NormalizedStatus::Unclassified,
            label: None,
            reason: Some(REASON_UNRECOGNIZED.to_string()),
        }
    }

    fn descriptive_only(label: &str) -> Self {
        Self {
            status: NormalizedStatus::Unclassified,
            label: Some(label.to_string()),
            reason: Some(REASON_DESCRIPTIVE_ONLY.to_string()),
        }
    }
}

/// Classify one raw grade under one schema. Total over both arguments.
pub fn classify(schema: &GradingSchema, raw: &RawGrade) -> Classification {
    match schema {
        GradingSchema::LetterGrade {
            brackets,
            fail_below,
            pass_requires,
        } => {
            let position = match raw {
                RawGrade::Score(score) => brackets.iter().position(|b| b.contains(*score)),
                RawGrade::Label(label) => brackets
                    .iter()
                    .position(|b| b.label.eq_ignore_ascii_case(label)),
            };
            let Some(index) = position else {
                return Classification::unrecognized();
            };
            let label = brackets[index].label.clone();

            // pass_requires wins over fail_below when both are set.
            let status = if let Some(required) = pass_requires {
                if label.eq_ignore_ascii_case(required) {
                    NormalizedStatus::Pass
                } else {
                    NormalizedStatus::Fail
                }
            } else if let Some(floor) = fail_below {
                // Brackets are ordered best first, so a position at or
                // past the floor's position fails.
                let floor_index = brackets
                    .iter()
                    .position(|b| b.label.eq_ignore_ascii_case(floor));
                match floor_index {
                    Some(f) if index >= f => NormalizedStatus::Fail,
                    _ => NormalizedStatus::Pass,
                }
            } else {
                NormalizedStatus::Pass
            };
            Classification::new(status, Some(label))
        }

        GradingSchema::ColorPlacard { colors } => match raw {
            RawGrade::Label(label) => colors
                .iter()
                .find(|c| c.color.eq_ignore_ascii_case(label))
                .map(|c| Classification::new(c.status, Some(c.color.clone())))
                .unwrap_or_else(Classification::unrecognized),
            RawGrade::Score(_) => Classification::unrecognized(),
        },

        GradingSchema::NumericScore {
            min,
            max,
            warning,
            critical,
        } => match raw {
            RawGrade::Score(score) if (*min..=*max).contains(score) => {
                let status = match (critical, warning) {
                    (Some(c), _) if score <= c => NormalizedStatus::Fail,
                    (_, Some(w)) if score <= w => NormalizedStatus::Warning,
                    _ => NormalizedStatus::Pass,
                };
                Classification::new(status, None)
            }
            _ => Classification::unrecognized(),
        },

        GradingSchema::NegativeScale {
            perfect,
            warning,
            critical,
        } => match raw {
            RawGrade::Score(score) if score <= perfect => {
                let status = if score <= critical {
                    NormalizedStatus::Fail
                } else if score <= warning {
                    NormalizedStatus::Warning
                } else {
                    NormalizedStatus::Pass
                };
                Classification::new(status, None)
            }
            _ => Classification::unrecognized(),
        },

        GradingSchema::PassReinspect => match raw {
            RawGrade::Label(label) if label.eq_ignore_ascii_case("pass") => {
                Classification::new(NormalizedStatus::Pass, Some("Pass".to_string()))
            }
            RawGrade::Label(label) if label.eq_ignore_ascii_case("closed") => {
                Classification::new(NormalizedStatus::Fail, Some("Closed".to_string()))
            }
            // A reinspection demand is urgent but not a closure.
            RawGrade::Label(_) => Classification::new(
                NormalizedStatus::Warning,
                Some("Reinspection Required".to_string()),
            ),
            RawGrade::Score(_) => Classification::unrecognized(),
        },

        GradingSchema::ThreeTierRating { tiers } => match raw {
            RawGrade::Label(label) => {
                let position = tiers.iter().position(|t| t.label.eq_ignore_ascii_case(label));
                match position {
                    Some(index) => {
                        let status = match index {
                            0 => NormalizedStatus::Pass,
                            1 => NormalizedStatus::Warning,
                            _ => NormalizedStatus::Fail,
                        };
                        Classification::new(status, Some(tiers[index].label.clone()))
                    }
                    None => Classification::unrecognized(),
                }
            }
            RawGrade::Score(_) => Classification::unrecognized(),
        },

        GradingSchema::PassFail => match raw {
            RawGrade::Label(label) if label.eq_ignore_ascii_case("pass") => {
                Classification::new(NormalizedStatus::Pass, Some("Pass".to_string()))
            }
            RawGrade::Label(label) if label.eq_ignore_ascii_case("closed") => {
                Classification::new(NormalizedStatus::Fail, Some("Closed".to_string()))
            }
            RawGrade::Label(_) => {
                Classification::new(NormalizedStatus::Fail, Some("Fail".to_string()))
            }
            RawGrade::Score(_) => Classification::unrecognized(),
        },

        GradingSchema::ReportOnly => Classification::descriptive_only("Report Only"),
        GradingSchema::ScoreOnly => Classification::descriptive_only("Score Only"),
    }
}
