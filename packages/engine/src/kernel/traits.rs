// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic. Selection,
// session transitions, and match resolution are domain code that consumes
// these contracts.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashSet;

use crate::common::{ConversationId, NotificationKind, ProfileId};
use crate::domains::profiles::models::{Preferences, Profile};

// =============================================================================
// Profile Store Trait (Infrastructure - durable profile table)
// =============================================================================

#[async_trait]
pub trait BaseProfileStore: Send + Sync {
    /// Read the full profile set in stable enumeration order.
    async fn get_all_profiles(&self) -> Result<Vec<Profile>>;

    /// Read a single profile.
    async fn get_profile(&self, id: ProfileId) -> Result<Option<Profile>>;

    /// Read a viewer's stored preferences (defaults when none are stored).
    async fn get_preferences(&self, id: ProfileId) -> Result<Preferences>;

    /// Insert or replace a profile and its preferences.
    async fn upsert_profile(&self, profile: &Profile, prefs: &Preferences) -> Result<()>;
}

// =============================================================================
// Swipe Ledger Trait (Infrastructure - durable per-viewer decided set)
// =============================================================================

#[async_trait]
pub trait BaseSwipeLedger: Send + Sync {
    /// Whether the viewer has already decided on this candidate.
    async fn has_decided(&self, viewer: ProfileId, candidate: ProfileId) -> Result<bool>;

    /// Record a decision. Idempotent: recording an id already present is a
    /// no-op, including under concurrent double insertion.
    async fn mark_decided(&self, viewer: ProfileId, candidate: ProfileId) -> Result<()>;

    /// Materialize every candidate id the viewer has decided on.
    async fn decided_ids(&self, viewer: ProfileId) -> Result<HashSet<ProfileId>>;
}

// =============================================================================
// Conversation Service Trait (Infrastructure - chat subsystem)
// =============================================================================

#[async_trait]
pub trait BaseConversationService: Send + Sync {
    /// Create the conversation for a matched pair, or return the existing
    /// one. Required to be idempotent per unordered pair.
    async fn create_or_get_conversation(
        &self,
        viewer: ProfileId,
        candidate: ProfileId,
    ) -> Result<ConversationId>;
}

// =============================================================================
// Notification Trait (Infrastructure - fire-and-forget emission)
// =============================================================================

#[async_trait]
pub trait BaseNotificationService: Send + Sync {
    /// Emit a notification. Failures are the collaborator's concern; callers
    /// log and continue.
    async fn notify(
        &self,
        recipient: ProfileId,
        kind: NotificationKind,
        payload: serde_json::Value,
    ) -> Result<()>;
}

// =============================================================================
// Random Source Trait (Infrastructure - injectable entropy)
// =============================================================================

/// Uniform entropy source behind the match probability rule.
///
/// Not required to be cryptographically secure, but must be replaceable with
/// a deterministic source in tests.
pub trait BaseRandomSource: Send + Sync {
    /// Next draw, uniform on [0, 1).
    fn next_uniform(&self) -> f64;
}
