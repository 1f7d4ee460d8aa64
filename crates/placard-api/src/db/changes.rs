//! Regulatory change persistence on the `regulatory_changes` table.
//!
//! Scope is stored as JSONB (it carries the state or county name);
//! impact level and status are stored as their snake_case text forms.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use placard_alerts::{ImpactLevel, SourceScope};

use crate::changes::{ChangeStats, ChangeStatus, ChangeStore, ChangeStoreError, RegulatoryChange};

/// Postgres-backed [`ChangeStore`].
#[derive(Debug, Clone)]
pub struct PgChangeStore {
    pool: PgPool,
}

impl PgChangeStore {
    /// Wrap a connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn backend(e: impl std::fmt::Display) -> ChangeStoreError {
    ChangeStoreError::Backend(e.to_string())
}

fn impact_to_str(impact: ImpactLevel) -> &'static str {
    match impact {
        ImpactLevel::ActionRequired => "action_required",
        ImpactLevel::Awareness => "awareness",
        ImpactLevel::Informational => "informational",
    }
}

const SELECT_COLUMNS: &str = "SELECT id, title, summary, scope, source_detail, impact_level, \
     status, effective_date, action_items, affected_areas, created_at, reviewed_by, \
     reviewed_at, published_at FROM regulatory_changes";

#[async_trait]
impl ChangeStore for PgChangeStore {
    async fn insert(&self, change: &RegulatoryChange) -> Result<(), ChangeStoreError> {
        let scope = serde_json::to_value(&change.scope).map_err(backend)?;
        let action_items = serde_json::to_value(&change.action_items).map_err(backend)?;
        let affected_areas = serde_json::to_value(&change.affected_areas).map_err(backend)?;

        sqlx::query(
            "INSERT INTO regulatory_changes \
                 (id, title, summary, scope, source_detail, impact_level, status, \
                  effective_date, action_items, affected_areas, created_at, \
                  reviewed_by, reviewed_at, published_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
        )
        .bind(change.id)
        .bind(&change.title)
        .bind(&change.summary)
        .bind(&scope)
        .bind(&change.source_detail)
        .bind(impact_to_str(change.impact_level))
        .bind(change.status.as_str())
        .bind(change.effective_date)
        .bind(&action_items)
        .bind(&affected_areas)
        .bind(change.created_at)
        .bind(&change.reviewed_by)
        .bind(change.reviewed_at)
        .bind(change.published_at)
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<RegulatoryChange>, ChangeStoreError> {
        let row = sqlx::query_as::<_, ChangeRow>(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?;

        row.map(ChangeRow::into_record).transpose()
    }

    async fn update(&self, change: &RegulatoryChange) -> Result<bool, ChangeStoreError> {
        let scope = serde_json::to_value(&change.scope).map_err(backend)?;
        let action_items = serde_json::to_value(&change.action_items).map_err(backend)?;
        let affected_areas = serde_json::to_value(&change.affected_areas).map_err(backend)?;

        let result = sqlx::query(
            "UPDATE regulatory_changes SET \
                 title = $1, summary = $2, scope = $3, source_detail = $4, \
                 impact_level = $5, status = $6, effective_date = $7, \
                 action_items = $8, affected_areas = $9, reviewed_by = $10, \
                 reviewed_at = $11, published_at = $12 \
             WHERE id = $13",
        )
        .bind(&change.title)
        .bind(&change.summary)
        .bind(&scope)
        .bind(&change.source_detail)
        .bind(impact_to_str(change.impact_level))
        .bind(change.status.as_str())
        .bind(change.effective_date)
        .bind(&action_items)
        .bind(&affected_areas)
        .bind(&change.reviewed_by)
        .bind(change.reviewed_at)
        .bind(change.published_at)
        .bind(change.id)
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_by_status(
        &self,
        status: ChangeStatus,
    ) -> Result<Vec<RegulatoryChange>, ChangeStoreError> {
        let rows = sqlx::query_as::<_, ChangeRow>(&format!(
            "{SELECT_COLUMNS} WHERE status = $1 ORDER BY created_at DESC"
        ))
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        rows.into_iter().map(ChangeRow::into_record).collect()
    }

    async fn stats(&self, now: DateTime<Utc>) -> Result<ChangeStats, ChangeStoreError> {
        let week_ago = now - Duration::days(7);
        let row = sqlx::query_as::<_, StatsRow>(
            "SELECT \
                 COUNT(*) FILTER (WHERE status = 'pending_review') AS pending, \
                 COUNT(*) FILTER (WHERE status = 'published') AS total_live, \
                 COUNT(*) FILTER (WHERE status = 'published' AND published_at >= $1) \
                     AS published_this_week, \
                 MAX(created_at) AS last_pipeline_run \
             FROM regulatory_changes",
        )
        .bind(week_ago)
        .fetch_one(&self.pool)
        .await
        .map_err(backend)?;

        Ok(ChangeStats {
            pending: row.pending.max(0) as u64,
            published_this_week: row.published_this_week.max(0) as u64,
            total_live: row.total_live.max(0) as u64,
            last_pipeline_run: row.last_pipeline_run,
        })
    }
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct ChangeRow {
    id: Uuid,
    title: String,
    summary: String,
    scope: serde_json::Value,
    source_detail: String,
    impact_level: String,
    status: String,
    effective_date: Option<NaiveDate>,
    action_items: serde_json::Value,
    affected_areas: serde_json::Value,
    created_at: DateTime<Utc>,
    reviewed_by: Option<String>,
    reviewed_at: Option<DateTime<Utc>>,
    published_at: Option<DateTime<Utc>>,
}

#[derive(sqlx::FromRow)]
struct StatsRow {
    pending: i64,
    total_live: i64,
    published_this_week: i64,
    last_pipeline_run: Option<DateTime<Utc>>,
}

impl ChangeRow {
    fn into_record(self) -> Result<RegulatoryChange, ChangeStoreError> {
        let scope: SourceScope = serde_json::from_value(self.scope)
            .map_err(|e| backend(format!("change {}: scope: {e}", self.id)))?;
        let impact_level: ImpactLevel =
            serde_json::from_value(serde_json::Value::String(self.impact_level.clone()))
                .map_err(|e| backend(format!("change {}: impact_level: {e}", self.id)))?;
        let status = ChangeStatus::parse(&self.status)
            .ok_or_else(|| backend(format!("change {}: unknown status '{}'", self.id, self.status)))?;
        let action_items: Vec<String> = serde_json::from_value(self.action_items)
            .map_err(|e| backend(format!("change {}: action_items: {e}", self.id)))?;
        let affected_areas: Vec<String> = serde_json::from_value(self.affected_areas)
            .map_err(|e| backend(format!("change {}: affected_areas: {e}", self.id)))?;

        Ok(RegulatoryChange {
            id: self.id,
            title: self.title,
            summary: self.summary,
            scope,
            source_detail: self.source_detail,
            impact_level,
            status,
            effective_date: self.effective_date,
            action_items,
            affected_areas,
            created_at: self.created_at,
            reviewed_by: self.reviewed_by,
            reviewed_at: self.reviewed_at,
            published_at: self.published_at,
        })
    }
}
