use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::info;

use crate::common::{ConversationId, ProfileId};

/// Canonical ordering for a conversation's member pair.
///
/// Conversations are keyed by the unordered pair, so both members resolve to
/// the same row regardless of who matched first.
pub fn ordered_pair(a: ProfileId, b: ProfileId) -> (ProfileId, ProfileId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Conversation model - SQL persistence layer
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Conversation {
    pub id: ConversationId,
    pub member_a: ProfileId,
    pub member_b: ProfileId,
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    /// Create the conversation for a matched pair, or return the existing one.
    ///
    /// Idempotent per unordered pair: the insert is ON CONFLICT DO NOTHING on
    /// the canonical (member_a, member_b) key, and the following select reads
    /// whichever row won.
    pub async fn create_or_get(
        viewer_id: ProfileId,
        candidate_id: ProfileId,
        pool: &PgPool,
    ) -> Result<Self> {
        let (member_a, member_b) = ordered_pair(viewer_id, candidate_id);

        let inserted = sqlx::query(
            "INSERT INTO conversations (id, member_a, member_b)
             VALUES ($1, $2, $3)
             ON CONFLICT (member_a, member_b) DO NOTHING",
        )
        .bind(ConversationId::new())
        .bind(member_a)
        .bind(member_b)
        .execute(pool)
        .await?;

        if inserted.rows_affected() > 0 {
            info!(%member_a, %member_b, "Conversation created");
        }

        let conversation = sqlx::query_as::<_, Self>(
            "SELECT * FROM conversations WHERE member_a = $1 AND member_b = $2",
        )
        .bind(member_a)
        .bind(member_b)
        .fetch_one(pool)
        .await?;

        Ok(conversation)
    }
}
