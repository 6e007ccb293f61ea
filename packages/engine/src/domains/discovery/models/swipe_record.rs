use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::HashSet;

use crate::common::ProfileId;

/// Swipe ledger row - SQL persistence layer
///
/// One row per (viewer, candidate) pair ever decided on. The ledger only
/// grows: undo rewinds the session cursor but never deletes a row, and no
/// removal operation is exposed here.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SwipeRecord {
    pub viewer_id: ProfileId,
    pub candidate_id: ProfileId,
    pub created_at: DateTime<Utc>,
}

impl SwipeRecord {
    /// Record a decision (idempotent).
    ///
    /// Uses ON CONFLICT DO NOTHING so double insertion - a retried call or a
    /// second device racing on the same pair - is a no-op, not an error.
    pub async fn record(viewer_id: ProfileId, candidate_id: ProfileId, pool: &PgPool) -> Result<()> {
        sqlx::query(
            "INSERT INTO swipes (viewer_id, candidate_id)
             VALUES ($1, $2)
             ON CONFLICT (viewer_id, candidate_id) DO NOTHING",
        )
        .bind(viewer_id)
        .bind(candidate_id)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Whether the viewer has already decided on this candidate.
    pub async fn exists(
        viewer_id: ProfileId,
        candidate_id: ProfileId,
        pool: &PgPool,
    ) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM swipes WHERE viewer_id = $1 AND candidate_id = $2)",
        )
        .bind(viewer_id)
        .bind(candidate_id)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// All candidate ids the viewer has decided on, materialized for the
    /// selector.
    pub async fn decided_ids(viewer_id: ProfileId, pool: &PgPool) -> Result<HashSet<ProfileId>> {
        let ids = sqlx::query_scalar::<_, ProfileId>(
            "SELECT candidate_id FROM swipes WHERE viewer_id = $1",
        )
        .bind(viewer_id)
        .fetch_all(pool)
        .await?;

        Ok(ids.into_iter().collect())
    }
}
