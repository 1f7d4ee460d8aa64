//! # Alert Model and Review Lifecycle
//!
//! [`AlertStatus`] is strictly forward-ordered. The only transitions are
//! `new → reviewed`, `reviewed → action_taken`, and the shortcut
//! `new → action_taken` (which records the implicit review). Nothing moves
//! an alert backward; there is no operation that returns one to `new`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::impact::SourceScope;

/// A unique identifier for a regulatory alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlertId(Uuid);

impl AlertId {
    /// Create a new random alert identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an alert identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AlertId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AlertId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How urgently an operator must act on an alert.
///
/// Assigned at ingestion and immutable thereafter; review does not change
/// an alert's impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactLevel {
    /// The operator must do something before the effective date.
    ActionRequired,
    /// Worth knowing; may require action later.
    Awareness,
    /// Background information only.
    Informational,
}

/// Review lifecycle state. Strictly forward-ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    /// Ingested, not yet looked at.
    New,
    /// A person has reviewed the alert.
    Reviewed,
    /// The operator has completed the required action.
    ActionTaken,
}

impl std::fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::Reviewed => write!(f, "reviewed"),
            Self::ActionTaken => write!(f, "action_taken"),
        }
    }
}

/// Who reviewed an alert and when. Written exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// Display name of the reviewer.
    pub reviewed_by: String,
    /// When the review happened.
    pub reviewed_at: DateTime<Utc>,
}

/// Errors from the alert lifecycle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlertError {
    /// The requested transition is not forward.
    #[error("invalid alert transition from {from} to {to}")]
    InvalidTransition {
        /// The alert's current status.
        from: AlertStatus,
        /// The attempted target status.
        to: AlertStatus,
    },
}

/// One regulatory-change alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegulatoryAlert {
    /// Unique identifier.
    pub id: AlertId,
    /// Where the change came from, with its targeting scope.
    pub scope: SourceScope,
    /// Citation detail, e.g. "CalCode §114002".
    pub source_detail: String,
    /// Urgency, fixed at ingestion.
    pub impact_level: ImpactLevel,
    /// Review lifecycle state.
    pub status: AlertStatus,
    /// Plain-language title.
    pub title: String,
    /// Plain-language summary for kitchen operators.
    pub summary: String,
    /// When the change takes effect.
    pub effective_date: NaiveDate,
    /// When the change was published by the source.
    pub posted_date: NaiveDate,
    /// Concrete steps the operator should take.
    pub action_items: Vec<String>,
    /// Compliance areas touched, e.g. "Food Safety", "Fire Safety".
    pub affected_areas: Vec<String>,
    /// The review audit fact, once one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<ReviewRecord>,
}

impl RegulatoryAlert {
    /// Create a new alert in the `new` state.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        scope: SourceScope,
        source_detail: impl Into<String>,
        impact_level: ImpactLevel,
        title: impl Into<String>,
        summary: impl Into<String>,
        effective_date: NaiveDate,
        posted_date: NaiveDate,
    ) -> Self {
        Self {
            id: AlertId::new(),
            scope,
            source_detail: source_detail.into(),
            impact_level,
            status: AlertStatus::New,
            title: title.into(),
            summary: summary.into(),
            effective_date,
            posted_date,
            action_items: Vec::new(),
            affected_areas: Vec::new(),
            review: None,
        }
    }

    /// Mark the alert reviewed. Valid only from `new`; records the review
    /// audit fact exactly once.
    pub fn mark_reviewed(
        &mut self,
        reviewer: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Result<(), AlertError> {
        match self.status {
            AlertStatus::New => {
                self.status = AlertStatus::Reviewed;
                self.review = Some(ReviewRecord {
                    reviewed_by: reviewer.into(),
                    reviewed_at: at,
                });
                Ok(())
            }
            from => Err(AlertError::InvalidTransition {
                from,
                to: AlertStatus::Reviewed,
            }),
        }
    }

    /// Mark the required action completed. Valid from `reviewed`, or from
    /// `new` (which records the implicit review). An existing review
    /// record is never overwritten.
    pub fn mark_action_taken(
        &mut self,
        reviewer: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Result<(), AlertError> {
        match self.status {
            AlertStatus::New => {
                self.review = Some(ReviewRecord {
                    reviewed_by: reviewer.into(),
                    reviewed_at: at,
                });
                self.status = AlertStatus::ActionTaken;
                Ok(())
            }
            AlertStatus::Reviewed => {
                self.status = AlertStatus::ActionTaken;
                Ok(())
            }
            from => Err(AlertError::InvalidTransition {
                from,
                to: AlertStatus::ActionTaken,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert() -> RegulatoryAlert {
        RegulatoryAlert::new(
            SourceScope::State("CA".to_string()),
            "CalCode §114002",
            ImpactLevel::ActionRequired,
            "California Updates Cooling Requirements for Cooked Foods",
            "First-stage cooling window shortened.",
            NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 5).unwrap(),
        )
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn new_alert_starts_unreviewed() {
        let a = alert();
        assert_eq!(a.status, AlertStatus::New);
        assert!(a.review.is_none());
    }

    #[test]
    fn review_records_the_audit_fact() {
        let mut a = alert();
        let at = now();
        a.mark_reviewed("Sarah Chen", at).unwrap();
        assert_eq!(a.status, AlertStatus::Reviewed);
        let review = a.review.as_ref().unwrap();
        assert_eq!(review.reviewed_by, "Sarah Chen");
        assert_eq!(review.reviewed_at, at);
    }

    #[test]
    fn re_review_is_rejected_and_preserves_the_original_record() {
        let mut a = alert();
        let first = now();
        a.mark_reviewed("Sarah Chen", first).unwrap();

        let err = a.mark_reviewed("James Wilson", now()).unwrap_err();
        assert_eq!(
            err,
            AlertError::InvalidTransition {
                from: AlertStatus::Reviewed,
                to: AlertStatus::Reviewed,
            }
        );
        assert_eq!(a.review.as_ref().unwrap().reviewed_by, "Sarah Chen");
    }

    #[test]
    fn reviewed_to_action_taken_keeps_the_original_reviewer() {
        let mut a = alert();
        a.mark_reviewed("Sarah Chen", now()).unwrap();
        a.mark_action_taken("James Wilson", now()).unwrap();
        assert_eq!(a.status, AlertStatus::ActionTaken);
        // The audit fact belongs to the reviewer, not the actor.
        assert_eq!(a.review.as_ref().unwrap().reviewed_by, "Sarah Chen");
    }

    #[test]
    fn action_taken_directly_from_new_records_the_implicit_review() {
        let mut a = alert();
        a.mark_action_taken("Sarah Chen", now()).unwrap();
        assert_eq!(a.status, AlertStatus::ActionTaken);
        assert_eq!(a.review.as_ref().unwrap().reviewed_by, "Sarah Chen");
    }

    #[test]
    fn nothing_moves_backward_from_action_taken() {
        let mut a = alert();
        a.mark_action_taken("Sarah Chen", now()).unwrap();
        assert!(a.mark_reviewed("Sarah Chen", now()).is_err());
        assert!(a.mark_action_taken("Sarah Chen", now()).is_err());
        assert_eq!(a.status, AlertStatus::ActionTaken);
    }

    #[test]
    fn status_serde_uses_snake_case() {
        assert_eq!(
            serde_json::to_string(&AlertStatus::ActionTaken).unwrap(),
            "\"action_taken\""
        );
        assert_eq!(
            serde_json::to_string(&ImpactLevel::ActionRequired).unwrap(),
            "\"action_required\""
        );
    }

    #[test]
    fn alert_roundtrips_through_json() {
        let mut a = alert();
        a.action_items = vec!["Update cooling logs".to_string()];
        a.affected_areas = vec!["Food Safety".to_string()];
        let json = serde_json::to_string(&a).unwrap();
        let back: RegulatoryAlert = serde_json::from_str(&json).unwrap();
        assert_eq!(a, back);
    }
}
