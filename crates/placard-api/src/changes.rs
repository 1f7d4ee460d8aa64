//! # Regulatory Change Review Store
//!
//! Pending regulatory changes land here from the monitoring pipeline and
//! wait for a human editor. An editor publishes, rejects, edits, or
//! unpublishes them through the admin console; only published changes are
//! visible to customers.
//!
//! The [`ChangeStore`] trait abstracts the backing store so the router can
//! run against Postgres in production and [`InMemoryChangeStore`] in tests.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

use placard_alerts::{ImpactLevel, SourceScope};

// ── Status ──────────────────────────────────────────────────────────────────

/// Editorial state of a regulatory change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeStatus {
    /// Ingested by the pipeline, awaiting an editor.
    PendingReview,
    /// Approved and visible to customers.
    Published,
    /// Declined; kept for the audit trail, never shown to customers.
    Rejected,
}

impl ChangeStatus {
    /// Return the string representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingReview => "pending_review",
            Self::Published => "published",
            Self::Rejected => "rejected",
        }
    }

    /// Parse a status filter string. Returns `None` for unknown values.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending_review" => Some(Self::PendingReview),
            "published" => Some(Self::Published),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl std::fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ── Record ──────────────────────────────────────────────────────────────────

/// A regulatory change moving through editorial review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegulatoryChange {
    /// Unique identifier.
    pub id: Uuid,
    /// Plain-language title.
    pub title: String,
    /// Plain-language summary for kitchen operators.
    pub summary: String,
    /// Where the change came from, with its targeting scope.
    pub scope: SourceScope,
    /// Citation detail, e.g. "CalCode §114002".
    pub source_detail: String,
    /// Urgency assigned at ingestion.
    pub impact_level: ImpactLevel,
    /// Editorial state.
    pub status: ChangeStatus,
    /// When the change takes effect, if known.
    pub effective_date: Option<NaiveDate>,
    /// Concrete steps the operator should take.
    pub action_items: Vec<String>,
    /// Compliance areas touched, e.g. "Food Safety".
    pub affected_areas: Vec<String>,
    /// When the pipeline ingested the change.
    pub created_at: DateTime<Utc>,
    /// Editor who published or rejected the change.
    pub reviewed_by: Option<String>,
    /// When the editorial decision happened.
    pub reviewed_at: Option<DateTime<Utc>>,
    /// When the change went live. Cleared on unpublish.
    pub published_at: Option<DateTime<Utc>>,
}

/// Dashboard counters for the admin console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeStats {
    /// Changes awaiting review.
    pub pending: u64,
    /// Changes published within the last seven days.
    pub published_this_week: u64,
    /// Changes currently live.
    pub total_live: u64,
    /// Most recent pipeline ingestion, if any change exists.
    pub last_pipeline_run: Option<DateTime<Utc>>,
}

// ── Store trait ─────────────────────────────────────────────────────────────

/// Errors from a change store backend.
#[derive(Error, Debug)]
pub enum ChangeStoreError {
    /// The backend failed to execute the operation.
    #[error("change store backend error: {0}")]
    Backend(String),
}

/// Persistence seam for regulatory changes.
#[async_trait]
pub trait ChangeStore: Send + Sync + std::fmt::Debug {
    /// Insert a new change.
    async fn insert(&self, change: &RegulatoryChange) -> Result<(), ChangeStoreError>;

    /// Fetch a change by ID.
    async fn get(&self, id: Uuid) -> Result<Option<RegulatoryChange>, ChangeStoreError>;

    /// Overwrite an existing change. Returns `false` if no row matched.
    async fn update(&self, change: &RegulatoryChange) -> Result<bool, ChangeStoreError>;

    /// List changes in one editorial state, newest first.
    async fn list_by_status(
        &self,
        status: ChangeStatus,
    ) -> Result<Vec<RegulatoryChange>, ChangeStoreError>;

    /// Compute dashboard counters.
    async fn stats(&self, now: DateTime<Utc>) -> Result<ChangeStats, ChangeStoreError>;
}

// ── In-memory implementation ────────────────────────────────────────────────

/// In-memory [`ChangeStore`] for development mode and router tests.
#[derive(Debug, Default)]
pub struct InMemoryChangeStore {
    changes: RwLock<HashMap<Uuid, RegulatoryChange>>,
}

impl InMemoryChangeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChangeStore for InMemoryChangeStore {
    async fn insert(&self, change: &RegulatoryChange) -> Result<(), ChangeStoreError> {
        self.changes.write().insert(change.id, change.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<RegulatoryChange>, ChangeStoreError> {
        Ok(self.changes.read().get(&id).cloned())
    }

    async fn update(&self, change: &RegulatoryChange) -> Result<bool, ChangeStoreError> {
        let mut changes = self.changes.write();
        match changes.get_mut(&change.id) {
            Some(existing) => {
                *existing = change.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_by_status(
        &self,
        status: ChangeStatus,
    ) -> Result<Vec<RegulatoryChange>, ChangeStoreError> {
        let mut matching: Vec<RegulatoryChange> = self
            .changes
            .read()
            .values()
            .filter(|c| c.status == status)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn stats(&self, now: DateTime<Utc>) -> Result<ChangeStats, ChangeStoreError> {
        let changes = self.changes.read();
        let week_ago = now - Duration::days(7);
        let pending = changes
            .values()
            .filter(|c| c.status == ChangeStatus::PendingReview)
            .count() as u64;
        let total_live = changes
            .values()
            .filter(|c| c.status == ChangeStatus::Published)
            .count() as u64;
        let published_this_week = changes
            .values()
            .filter(|c| {
                c.status == ChangeStatus::Published
                    && c.published_at.is_some_and(|at| at >= week_ago)
            })
            .count() as u64;
        let last_pipeline_run = changes.values().map(|c| c.created_at).max();
        Ok(ChangeStats {
            pending,
            published_this_week,
            total_live,
            last_pipeline_run,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(status: ChangeStatus) -> RegulatoryChange {
        RegulatoryChange {
            id: Uuid::new_v4(),
            title: "California Updates Cooling Requirements".to_string(),
            summary: "First-stage cooling window shortened.".to_string(),
            scope: SourceScope::State("CA".to_string()),
            source_detail: "CalCode §114002".to_string(),
            impact_level: ImpactLevel::ActionRequired,
            status,
            effective_date: NaiveDate::from_ymd_opt(2026, 4, 1),
            action_items: vec![],
            affected_areas: vec!["Food Safety".to_string()],
            created_at: Utc::now(),
            reviewed_by: None,
            reviewed_at: None,
            published_at: None,
        }
    }

    #[tokio::test]
    async fn insert_then_get_roundtrips() {
        let store = InMemoryChangeStore::new();
        let c = change(ChangeStatus::PendingReview);
        store.insert(&c).await.unwrap();
        assert_eq!(store.get(c.id).await.unwrap(), Some(c));
    }

    #[tokio::test]
    async fn update_missing_row_reports_no_match() {
        let store = InMemoryChangeStore::new();
        let c = change(ChangeStatus::PendingReview);
        assert!(!store.update(&c).await.unwrap());
    }

    #[tokio::test]
    async fn list_filters_by_status_newest_first() {
        let store = InMemoryChangeStore::new();
        let mut older = change(ChangeStatus::PendingReview);
        older.created_at = Utc::now() - Duration::hours(2);
        let newer = change(ChangeStatus::PendingReview);
        let published = change(ChangeStatus::Published);
        store.insert(&older).await.unwrap();
        store.insert(&newer).await.unwrap();
        store.insert(&published).await.unwrap();

        let pending = store
            .list_by_status(ChangeStatus::PendingReview)
            .await
            .unwrap();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].id, newer.id);
        assert_eq!(pending[1].id, older.id);
    }

    #[tokio::test]
    async fn stats_counts_the_seven_day_window() {
        let store = InMemoryChangeStore::new();
        let now = Utc::now();

        let mut recent = change(ChangeStatus::Published);
        recent.published_at = Some(now - Duration::days(2));
        let mut stale = change(ChangeStatus::Published);
        stale.published_at = Some(now - Duration::days(30));
        let pending = change(ChangeStatus::PendingReview);
        store.insert(&recent).await.unwrap();
        store.insert(&stale).await.unwrap();
        store.insert(&pending).await.unwrap();

        let stats = store.stats(now).await.unwrap();
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.total_live, 2);
        assert_eq!(stats.published_this_week, 1);
        assert!(stats.last_pipeline_run.is_some());
    }

    #[test]
    fn status_parse_rejects_unknown_values() {
        assert_eq!(
            ChangeStatus::parse("pending_review"),
            Some(ChangeStatus::PendingReview)
        );
        assert_eq!(ChangeStatus::parse("live"), None);
    }
}
