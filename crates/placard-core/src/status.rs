//! # Normalized Compliance Status
//!
//! Every grading system in [`crate::grading::GradingSchema`] collapses to
//! the same four-state result so dashboards and alerting can compare a Los
//! Angeles letter grade against a Sacramento color placard without knowing
//! either system.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The normalized outcome of interpreting a raw inspection value.
///
/// Statuses follow a strict severity ordering for most-restrictive
/// composition:
///
/// ```text
/// Ordering (worst → best): Fail < Unclassified < Warning < Pass
///
/// meet(a, b) = min(a, b)  — most restrictive wins
/// ```
///
/// `Fail` is absorbing under `meet`: one failing layer fails the
/// composition. `Unclassified` sits below `Warning` because an inspection
/// value the engine could not interpret must never look healthier than a
/// known warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizedStatus {
    /// The facility meets the jurisdiction's passing bar.
    Pass,
    /// Below par but not failing; corrective attention expected.
    Warning,
    /// The facility fails the jurisdiction's standard.
    Fail,
    /// The raw value could not be interpreted under the schema, or the
    /// schema is descriptive-only. Never passing, never failing.
    Unclassified,
}

impl NormalizedStatus {
    /// Severity ordering value. Lower is worse (more restrictive).
    fn ordering(self) -> u8 {
        match self {
            Self::Fail => 0,
            Self::Unclassified => 1,
            Self::Warning => 2,
            Self::Pass => 3,
        }
    }

    /// Most-restrictive composition.
    ///
    /// Returns the more severe of the two statuses. `Fail` is absorbing:
    /// `meet(x, Fail) == Fail` for all x.
    pub fn meet(self, other: Self) -> Self {
        if self.ordering() <= other.ordering() {
            self
        } else {
            other
        }
    }

    /// Whether this status should block a facility-facing decision.
    pub fn is_blocking(self) -> bool {
        matches!(self, Self::Fail)
    }

    /// Whether this status represents a passing interpretation.
    ///
    /// `Unclassified` is never passing: an uninterpretable value must be
    /// surfaced, not waved through.
    pub fn is_passing(self) -> bool {
        matches!(self, Self::Pass)
    }
}

impl PartialOrd for NormalizedStatus {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NormalizedStatus {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.ordering().cmp(&other.ordering())
    }
}

impl fmt::Display for NormalizedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "pass"),
            Self::Warning => write!(f, "warning"),
            Self::Fail => write!(f, "fail"),
            Self::Unclassified => write!(f, "unclassified"),
        }
    }
}
