//! Location-jurisdiction link persistence.
//!
//! Writes happen on the resolver's background task, never on the request
//! path. The upsert key `(location_id, jurisdiction_id, layer)` makes
//! re-resolution idempotent: the restrictiveness flag and timestamp are
//! refreshed in place.

use async_trait::async_trait;
use sqlx::PgPool;

use placard_core::{JurisdictionId, Layer, LocationId};
use placard_resolve::{LinkError, LocationJurisdictionLink};

/// Postgres-backed [`LocationJurisdictionLink`].
#[derive(Debug, Clone)]
pub struct PgLink {
    pool: PgPool,
}

impl PgLink {
    /// Wrap a connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationJurisdictionLink for PgLink {
    async fn upsert(
        &self,
        location_id: LocationId,
        jurisdiction_id: JurisdictionId,
        layer: Layer,
        is_most_restrictive: bool,
    ) -> Result<(), LinkError> {
        sqlx::query(
            "INSERT INTO location_jurisdictions \
                 (location_id, jurisdiction_id, layer, is_most_restrictive, resolved_at) \
             VALUES ($1, $2, $3, $4, now()) \
             ON CONFLICT (location_id, jurisdiction_id, layer) \
             DO UPDATE SET is_most_restrictive = EXCLUDED.is_most_restrictive, \
                           resolved_at = now()",
        )
        .bind(location_id.as_uuid())
        .bind(jurisdiction_id.as_uuid())
        .bind(layer.as_str())
        .bind(is_most_restrictive)
        .execute(&self.pool)
        .await
        .map_err(|e| LinkError::Backend(e.to_string()))?;

        Ok(())
    }
}
