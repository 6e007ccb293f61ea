//! Engine dependencies for actions (using traits for testability)
//!
//! This module provides the central dependency container used by the
//! discovery actions, plus the Postgres adapters that wire the infrastructure
//! traits to the domain models.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

use crate::common::{ConversationId, NotificationKind, ProfileId};
use crate::domains::conversations::models::Conversation;
use crate::domains::discovery::models::SwipeRecord;
use crate::domains::matching::MatchResolver;
use crate::domains::profiles::models::{Preferences, Profile};
use crate::kernel::random::ThreadRandomSource;
use crate::kernel::traits::{
    BaseConversationService, BaseNotificationService, BaseProfileStore, BaseRandomSource,
    BaseSwipeLedger,
};

// =============================================================================
// Postgres adapters (delegate to the domain models)
// =============================================================================

/// Profile store backed by the profiles table.
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseProfileStore for PgProfileStore {
    async fn get_all_profiles(&self) -> Result<Vec<Profile>> {
        Profile::find_all(&self.pool).await
    }

    async fn get_profile(&self, id: ProfileId) -> Result<Option<Profile>> {
        Profile::find_by_id(id, &self.pool).await
    }

    async fn get_preferences(&self, id: ProfileId) -> Result<Preferences> {
        Profile::find_preferences(id, &self.pool).await
    }

    async fn upsert_profile(&self, profile: &Profile, prefs: &Preferences) -> Result<()> {
        profile.upsert(prefs, &self.pool).await
    }
}

/// Swipe ledger backed by the swipes table.
pub struct PgSwipeLedger {
    pool: PgPool,
}

impl PgSwipeLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseSwipeLedger for PgSwipeLedger {
    async fn has_decided(&self, viewer: ProfileId, candidate: ProfileId) -> Result<bool> {
        SwipeRecord::exists(viewer, candidate, &self.pool).await
    }

    async fn mark_decided(&self, viewer: ProfileId, candidate: ProfileId) -> Result<()> {
        SwipeRecord::record(viewer, candidate, &self.pool).await
    }

    async fn decided_ids(&self, viewer: ProfileId) -> Result<HashSet<ProfileId>> {
        SwipeRecord::decided_ids(viewer, &self.pool).await
    }
}

/// Conversation service backed by the conversations table.
pub struct PgConversationService {
    pool: PgPool,
}

impl PgConversationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseConversationService for PgConversationService {
    async fn create_or_get_conversation(
        &self,
        viewer: ProfileId,
        candidate: ProfileId,
    ) -> Result<ConversationId> {
        let conversation = Conversation::create_or_get(viewer, candidate, &self.pool).await?;
        Ok(conversation.id)
    }
}

/// Notification emitter that only logs.
///
/// Push delivery belongs to the surrounding app; this is the default sink
/// when the engine runs standalone.
pub struct LogNotificationService;

#[async_trait]
impl BaseNotificationService for LogNotificationService {
    async fn notify(
        &self,
        recipient: ProfileId,
        kind: NotificationKind,
        payload: serde_json::Value,
    ) -> Result<()> {
        info!(recipient = %recipient, kind = %kind, %payload, "Notification emitted");
        Ok(())
    }
}

// =============================================================================
// EngineDeps
// =============================================================================

/// Engine dependencies accessible to actions (using traits for testability)
#[derive(Clone)]
pub struct EngineDeps {
    pub profiles: Arc<dyn BaseProfileStore>,
    pub ledger: Arc<dyn BaseSwipeLedger>,
    pub conversations: Arc<dyn BaseConversationService>,
    pub notifications: Arc<dyn BaseNotificationService>,
    pub resolver: MatchResolver,
}

impl EngineDeps {
    /// Create new EngineDeps with the given collaborators
    pub fn new(
        profiles: Arc<dyn BaseProfileStore>,
        ledger: Arc<dyn BaseSwipeLedger>,
        conversations: Arc<dyn BaseConversationService>,
        notifications: Arc<dyn BaseNotificationService>,
        random: Arc<dyn BaseRandomSource>,
    ) -> Self {
        Self {
            profiles,
            ledger,
            conversations,
            notifications,
            resolver: MatchResolver::new(random),
        }
    }

    /// Wire everything to Postgres, with log-only notifications.
    pub fn postgres(pool: PgPool, random: Arc<dyn BaseRandomSource>) -> Self {
        Self::new(
            Arc::new(PgProfileStore::new(pool.clone())),
            Arc::new(PgSwipeLedger::new(pool.clone())),
            Arc::new(PgConversationService::new(pool)),
            Arc::new(LogNotificationService),
            random,
        )
    }

    /// Postgres wiring with the default thread-local entropy source.
    pub fn postgres_default(pool: PgPool) -> Self {
        Self::postgres(pool, Arc::new(ThreadRandomSource))
    }
}
