//! # Grading Schema Union
//!
//! One closed definition of every grading system a health authority can
//! use. California alone spans letter grades (Los Angeles), color placards
//! (Sacramento, Kern), numeric scores, negative scales, pass/reinspect,
//! three-tier ratings, plain pass/fail, and report-only counties — this
//! enum is the single place they are all enumerated.
//!
//! The enum is internally tagged (`"type"`), so a record carrying an
//! unrecognized grading system fails at deserialization. Nothing downstream
//! ever sniffs a schema shape at read time: [`GradingSchema::validate`]
//! runs once at load, and interpretation matches exhaustively on the
//! variants. Adding a variant here is a compile error at every
//! interpretation site until it is handled.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::status::NormalizedStatus;

/// One bracket in a letter-grade system: a label and the inclusive score
/// range it covers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeBracket {
    /// Grade label, e.g. "A".
    pub label: String,
    /// Inclusive lower bound of the bracket.
    pub min: f64,
    /// Inclusive upper bound of the bracket.
    pub max: f64,
}

impl GradeBracket {
    /// Whether a score falls inside this bracket.
    pub fn contains(&self, score: f64) -> bool {
        score >= self.min && score <= self.max
    }
}

/// One color in a placard system, with its normalized status stored in the
/// record rather than re-derived per read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacardColor {
    /// Color name as posted, e.g. "Green".
    pub color: String,
    /// Human-readable criteria for earning this color.
    pub criteria: String,
    /// The normalized status this color maps to. Must be `Pass`,
    /// `Warning`, or `Fail`; validated at load.
    pub status: NormalizedStatus,
}

/// One tier in a three-tier rating system. Status is positional (best,
/// middle, worst), never stored, so a record cannot declare two passing
/// tiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    /// Tier label, e.g. "Good".
    pub label: String,
    /// Human-readable criteria for this tier.
    pub criteria: String,
}

/// The closed union of grading systems.
///
/// Serialized with an internal `"type"` tag in snake_case, so the wire form
/// of a letter-grade schema starts `{"type":"letter_grade",...}` and an
/// unknown tag is a hard deserialization failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GradingSchema {
    /// Posted letter grades over score brackets (Los Angeles, San Diego).
    LetterGrade {
        /// Brackets ordered best to worst, non-overlapping.
        brackets: Vec<GradeBracket>,
        /// Grades at or below this label fail, e.g. "C".
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fail_below: Option<String>,
        /// Only this exact label passes (strict counties such as
        /// Riverside, where a "B" is posted but not passing).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pass_requires: Option<String>,
    },
    /// Posted color placards (Sacramento, Kern).
    ColorPlacard {
        /// Configured colors with their stored status mapping.
        colors: Vec<PlacardColor>,
    },
    /// Numeric 0–100 style score with optional warning/critical cutoffs.
    NumericScore {
        /// Lowest representable score.
        min: f64,
        /// Highest representable score.
        max: f64,
        /// At or below this value the status is `Warning`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        warning: Option<f64>,
        /// At or below this value the status is `Fail`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        critical: Option<f64>,
    },
    /// Deduction-based scale where perfect is the top value and scores run
    /// downward (often negative).
    NegativeScale {
        /// The perfect (starting) value, typically 0.
        perfect: f64,
        /// At or below this value the status is `Warning`.
        warning: f64,
        /// At or below this value the status is `Fail`.
        critical: f64,
    },
    /// Pass or reinspection-required. A reinspection demand is urgent but
    /// not a closure, so the non-pass outcome is `Warning`.
    PassReinspect,
    /// Exactly three labeled tiers, best first (e.g. Good / Satisfactory /
    /// Unsatisfactory).
    ThreeTierRating {
        /// The tiers, best first. Position determines status.
        tiers: [Tier; 3],
    },
    /// Binary pass/fail.
    PassFail,
    /// Inspection reports published without a grade. Descriptive only.
    ReportOnly,
    /// A score is recorded but carries no pass/fail meaning. Descriptive
    /// only.
    ScoreOnly,
}

impl GradingSchema {
    /// Stable tag name for logging and diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::LetterGrade { .. } => "letter_grade",
            Self::ColorPlacard { .. } => "color_placard",
            Self::NumericScore { .. } => "numeric_score",
            Self::NegativeScale { .. } => "negative_scale",
            Self::PassReinspect => "pass_reinspect",
            Self::ThreeTierRating { .. } => "three_tier_rating",
            Self::PassFail => "pass_fail",
            Self::ReportOnly => "report_only",
            Self::ScoreOnly => "score_only",
        }
    }

    /// Whether this schema is descriptive-only and can never drive a
    /// blocking decision.
    pub fn is_descriptive_only(&self) -> bool {
        matches!(self, Self::ReportOnly | Self::ScoreOnly)
    }

    /// Validate the schema's internal consistency.
    ///
    /// Runs once when a jurisdiction record is loaded. A record that fails
    /// here never reaches the resolver or the scorer, so interpretation
    /// code can assume these invariants hold.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::LetterGrade {
                brackets,
                fail_below,
                pass_requires,
            } => {
                if brackets.is_empty() {
                    return Err(ConfigError::InvalidSchema(
                        "letter_grade requires at least one bracket".to_string(),
                    ));
                }
                for bracket in brackets {
                    if bracket.label.trim().is_empty() {
                        return Err(ConfigError::InvalidSchema(
                            "letter_grade bracket label must be non-empty".to_string(),
                        ));
                    }
                    if !bracket.min.is_finite()
                        || !bracket.max.is_finite()
                        || bracket.min > bracket.max
                    {
                        return Err(ConfigError::InvalidSchema(format!(
                            "letter_grade bracket \"{}\" has invalid range [{}, {}]",
                            bracket.label, bracket.min, bracket.max
                        )));
                    }
                }
                // Best first: each bracket must sit strictly above the next.
                for pair in brackets.windows(2) {
                    if pair[0].min <= pair[1].max {
                        return Err(ConfigError::InvalidSchema(format!(
                            "letter_grade brackets \"{}\" and \"{}\" overlap or are out of order",
                            pair[0].label, pair[1].label
                        )));
                    }
                }
                for referenced in [fail_below, pass_requires].into_iter().flatten() {
                    if !brackets.iter().any(|b| b.label == *referenced) {
                        return Err(ConfigError::UndefinedLabel(referenced.clone()));
                    }
                }
                Ok(())
            }
            Self::ColorPlacard { colors } => {
                if colors.is_empty() {
                    return Err(ConfigError::InvalidSchema(
                        "color_placard requires at least one color".to_string(),
                    ));
                }
                for (i, color) in colors.iter().enumerate() {
                    if color.color.trim().is_empty() {
                        return Err(ConfigError::InvalidSchema(
                            "color_placard color name must be non-empty".to_string(),
                        ));
                    }
                    if color.status == NormalizedStatus::Unclassified {
                        return Err(ConfigError::InvalidSchema(format!(
                            "color \"{}\" maps to unclassified; colors must map to pass, warning, or fail",
                            color.color
                        )));
                    }
                    let duplicate = colors[..i]
                        .iter()
                        .any(|prior| prior.color.eq_ignore_ascii_case(&color.color));
                    if duplicate {
                        return Err(ConfigError::InvalidSchema(format!(
                            "color \"{}\" is defined more than once",
                            color.color
                        )));
                    }
                }
                Ok(())
            }
            Self::NumericScore {
                min,
                max,
                warning,
                critical,
            } => {
                if !min.is_finite() || !max.is_finite() || min >= max {
                    return Err(ConfigError::InvalidSchema(format!(
                        "numeric_score range [{min}, {max}] is invalid"
                    )));
                }
                if let (Some(w), Some(c)) = (warning, critical) {
                    if c > w {
                        return Err(ConfigError::InvalidSchema(format!(
                            "numeric_score critical ({c}) must not exceed warning ({w})"
                        )));
                    }
                }
                Ok(())
            }
            Self::NegativeScale {
                perfect,
                warning,
                critical,
            } => {
                if !(critical < warning && warning <= perfect) {
                    return Err(ConfigError::InvalidSchema(format!(
                        "negative_scale requires critical < warning <= perfect, \
                         got {critical} / {warning} / {perfect}"
                    )));
                }
                Ok(())
            }
            Self::ThreeTierRating { tiers } => {
                for (i, tier) in tiers.iter().enumerate() {
                    if tier.label.trim().is_empty() {
                        return Err(ConfigError::InvalidSchema(
                            "three_tier_rating tier label must be non-empty".to_string(),
                        ));
                    }
                    let duplicate = tiers[..i]
                        .iter()
                        .any(|prior| prior.label.eq_ignore_ascii_case(&tier.label));
                    if duplicate {
                        return Err(ConfigError::InvalidSchema(format!(
                            "tier \"{}\" is defined more than once",
                            tier.label
                        )));
                    }
                }
                Ok(())
            }
            Self::PassReinspect | Self::PassFail | Self::ReportOnly | Self::ScoreOnly => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn la_letter_grade() -> GradingSchema {
        GradingSchema::LetterGrade {
            brackets: vec![
                GradeBracket {
                    label: "A".to_string(),
                    min: 90.0,
                    max: 100.0,
                },
                GradeBracket {
                    label: "B".to_string(),
                    min: 80.0,
                    max: 89.0,
                },
                GradeBracket {
                    label: "C".to_string(),
                    min: 70.0,
                    max: 79.0,
                },
            ],
            fail_below: Some("C".to_string()),
            pass_requires: None,
        }
    }

    #[test]
    fn la_letter_grade_validates() {
        assert!(la_letter_grade().validate().is_ok());
    }

    #[test]
    fn letter_grade_rejects_overlapping_brackets() {
        let schema = GradingSchema::LetterGrade {
            brackets: vec![
                GradeBracket {
                    label: "A".to_string(),
                    min: 85.0,
                    max: 100.0,
                },
                GradeBracket {
                    label: "B".to_string(),
                    min: 80.0,
                    max: 90.0,
                },
            ],
            fail_below: None,
            pass_requires: None,
        };
        assert!(matches!(
            schema.validate(),
            Err(ConfigError::InvalidSchema(_))
        ));
    }

    #[test]
    fn letter_grade_rejects_undefined_fail_below() {
        let schema = GradingSchema::LetterGrade {
            brackets: vec![GradeBracket {
                label: "A".to_string(),
                min: 90.0,
                max: 100.0,
            }],
            fail_below: Some("Z".to_string()),
            pass_requires: None,
        };
        assert_eq!(
            schema.validate(),
            Err(ConfigError::UndefinedLabel("Z".to_string()))
        );
    }

    #[test]
    fn color_placard_rejects_unclassified_mapping() {
        let schema = GradingSchema::ColorPlacard {
            colors: vec![PlacardColor {
                color: "Green".to_string(),
                criteria: "no major violations".to_string(),
                status: NormalizedStatus::Unclassified,
            }],
        };
        assert!(schema.validate().is_err());
    }

    #[test]
    fn color_placard_rejects_duplicate_color() {
        let schema = GradingSchema::ColorPlacard {
            colors: vec![
                PlacardColor {
                    color: "Green".to_string(),
                    criteria: "ok".to_string(),
                    status: NormalizedStatus::Pass,
                },
                PlacardColor {
                    color: "green".to_string(),
                    criteria: "also ok".to_string(),
                    status: NormalizedStatus::Warning,
                },
            ],
        };
        assert!(schema.validate().is_err());
    }

    #[test]
    fn numeric_score_rejects_critical_above_warning() {
        let schema = GradingSchema::NumericScore {
            min: 0.0,
            max: 100.0,
            warning: Some(50.0),
            critical: Some(70.0),
        };
        assert!(schema.validate().is_err());
    }

    #[test]
    fn negative_scale_enforces_threshold_order() {
        let good = GradingSchema::NegativeScale {
            perfect: 0.0,
            warning: -10.0,
            critical: -25.0,
        };
        assert!(good.validate().is_ok());

        let bad = GradingSchema::NegativeScale {
            perfect: 0.0,
            warning: -25.0,
            critical: -10.0,
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn unknown_schema_tag_fails_deserialization() {
        let raw = r#"{"type": "emoji_rating", "emojis": ["🙂", "😐"]}"#;
        let result: Result<GradingSchema, _> = serde_json::from_str(raw);
        assert!(result.is_err());
    }

    #[test]
    fn wire_form_is_internally_tagged() {
        let json = serde_json::to_value(&la_letter_grade()).unwrap();
        assert_eq!(json["type"], "letter_grade");
        assert_eq!(json["brackets"][0]["label"], "A");

        let json = serde_json::to_value(GradingSchema::PassReinspect).unwrap();
        assert_eq!(json["type"], "pass_reinspect");
    }

    #[test]
    fn schema_roundtrips_through_json() {
        let schema = GradingSchema::ThreeTierRating {
            tiers: [
                Tier {
                    label: "Good".to_string(),
                    criteria: "0-6 violation points".to_string(),
                },
                Tier {
                    label: "Satisfactory".to_string(),
                    criteria: "7-13 violation points".to_string(),
                },
                Tier {
                    label: "Unsatisfactory".to_string(),
                    criteria: "14+ violation points".to_string(),
                },
            ],
        };
        let json = serde_json::to_string(&schema).unwrap();
        let back: GradingSchema = serde_json::from_str(&json).unwrap();
        assert_eq!(schema, back);
    }

    #[test]
    fn descriptive_only_flags() {
        assert!(GradingSchema::ReportOnly.is_descriptive_only());
        assert!(GradingSchema::ScoreOnly.is_descriptive_only());
        assert!(!GradingSchema::PassFail.is_descriptive_only());
    }
}
