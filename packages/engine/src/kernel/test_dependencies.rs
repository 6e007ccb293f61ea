// TestDependencies - in-memory implementations for testing
//
// Provides recording collaborators that can be injected into EngineDeps for
// tests, plus deterministic entropy sources for the match resolver.

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::common::{ConversationId, NotificationKind, ProfileId};
use crate::domains::conversations::models::ordered_pair;
use crate::domains::profiles::models::{Preferences, Profile};
use crate::kernel::traits::{
    BaseConversationService, BaseNotificationService, BaseProfileStore, BaseRandomSource,
    BaseSwipeLedger,
};

// =============================================================================
// In-memory profile store
// =============================================================================

#[derive(Default)]
pub struct InMemoryProfileStore {
    profiles: Mutex<Vec<(Profile, Preferences)>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(self, profile: Profile, prefs: Preferences) -> Self {
        self.profiles.lock().unwrap().push((profile, prefs));
        self
    }
}

#[async_trait]
impl BaseProfileStore for InMemoryProfileStore {
    async fn get_all_profiles(&self) -> Result<Vec<Profile>> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .map(|(p, _)| p.clone())
            .collect())
    }

    async fn get_profile(&self, id: ProfileId) -> Result<Option<Profile>> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .find(|(p, _)| p.id == id)
            .map(|(p, _)| p.clone()))
    }

    async fn get_preferences(&self, id: ProfileId) -> Result<Preferences> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .find(|(p, _)| p.id == id)
            .map(|(_, prefs)| prefs.clone())
            .unwrap_or_default())
    }

    async fn upsert_profile(&self, profile: &Profile, prefs: &Preferences) -> Result<()> {
        let mut profiles = self.profiles.lock().unwrap();
        if let Some(entry) = profiles.iter_mut().find(|(p, _)| p.id == profile.id) {
            *entry = (profile.clone(), prefs.clone());
        } else {
            profiles.push((profile.clone(), prefs.clone()));
        }
        Ok(())
    }
}

// =============================================================================
// In-memory swipe ledger
// =============================================================================

#[derive(Default)]
pub struct InMemorySwipeLedger {
    decided: Mutex<HashSet<(ProfileId, ProfileId)>>,
    mark_calls: Mutex<Vec<(ProfileId, ProfileId)>>,
}

impl InMemorySwipeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `mark_decided` call, including idempotent repeats.
    pub fn mark_calls(&self) -> Vec<(ProfileId, ProfileId)> {
        self.mark_calls.lock().unwrap().clone()
    }

    /// Number of distinct (viewer, candidate) pairs recorded.
    pub fn decided_count(&self) -> usize {
        self.decided.lock().unwrap().len()
    }

    pub fn contains(&self, viewer: ProfileId, candidate: ProfileId) -> bool {
        self.decided.lock().unwrap().contains(&(viewer, candidate))
    }
}

#[async_trait]
impl BaseSwipeLedger for InMemorySwipeLedger {
    async fn has_decided(&self, viewer: ProfileId, candidate: ProfileId) -> Result<bool> {
        Ok(self.contains(viewer, candidate))
    }

    async fn mark_decided(&self, viewer: ProfileId, candidate: ProfileId) -> Result<()> {
        self.mark_calls.lock().unwrap().push((viewer, candidate));
        // Set semantics: double insertion is a no-op
        self.decided.lock().unwrap().insert((viewer, candidate));
        Ok(())
    }

    async fn decided_ids(&self, viewer: ProfileId) -> Result<HashSet<ProfileId>> {
        Ok(self
            .decided
            .lock()
            .unwrap()
            .iter()
            .filter(|(v, _)| *v == viewer)
            .map(|(_, c)| *c)
            .collect())
    }
}

// =============================================================================
// Recording conversation service
// =============================================================================

#[derive(Default)]
pub struct RecordingConversationService {
    created: Mutex<HashMap<(ProfileId, ProfileId), ConversationId>>,
    calls: Mutex<Vec<(ProfileId, ProfileId)>>,
    fail: AtomicBool,
}

impl RecordingConversationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail, to exercise side-effect failure handling.
    pub fn with_failure(self) -> Self {
        self.fail.store(true, Ordering::SeqCst);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Number of distinct conversations that exist.
    pub fn created_count(&self) -> usize {
        self.created.lock().unwrap().len()
    }

    pub fn conversation_for(&self, a: ProfileId, b: ProfileId) -> Option<ConversationId> {
        self.created.lock().unwrap().get(&ordered_pair(a, b)).copied()
    }
}

#[async_trait]
impl BaseConversationService for RecordingConversationService {
    async fn create_or_get_conversation(
        &self,
        viewer: ProfileId,
        candidate: ProfileId,
    ) -> Result<ConversationId> {
        self.calls.lock().unwrap().push((viewer, candidate));
        if self.fail.load(Ordering::SeqCst) {
            bail!("conversation service unavailable");
        }
        let id = *self
            .created
            .lock()
            .unwrap()
            .entry(ordered_pair(viewer, candidate))
            .or_insert_with(ConversationId::new);
        Ok(id)
    }
}

// =============================================================================
// Recording notification service
// =============================================================================

#[derive(Default)]
pub struct RecordingNotificationService {
    sent: Mutex<Vec<(ProfileId, NotificationKind, serde_json::Value)>>,
    fail: AtomicBool,
}

impl RecordingNotificationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail, to exercise fire-and-forget semantics.
    pub fn with_failure(self) -> Self {
        self.fail.store(true, Ordering::SeqCst);
        self
    }

    pub fn sent(&self) -> Vec<(ProfileId, NotificationKind, serde_json::Value)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl BaseNotificationService for RecordingNotificationService {
    async fn notify(
        &self,
        recipient: ProfileId,
        kind: NotificationKind,
        payload: serde_json::Value,
    ) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            bail!("notification channel unavailable");
        }
        self.sent.lock().unwrap().push((recipient, kind, payload));
        Ok(())
    }
}

// =============================================================================
// Deterministic entropy sources
// =============================================================================

/// Always returns the same draw.
pub struct FixedRandomSource(pub f64);

impl BaseRandomSource for FixedRandomSource {
    fn next_uniform(&self) -> f64 {
        self.0
    }
}

/// Returns a scripted sequence of draws; panics when the script runs dry so a
/// test that draws more entropy than it planned fails loudly.
pub struct ScriptedRandomSource {
    values: Mutex<VecDeque<f64>>,
}

impl ScriptedRandomSource {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: Mutex::new(values.into_iter().collect()),
        }
    }
}

impl BaseRandomSource for ScriptedRandomSource {
    fn next_uniform(&self) -> f64 {
        self.values
            .lock()
            .unwrap()
            .pop_front()
            .expect("scripted random source exhausted")
    }
}

// Convenience: build EngineDeps from Arc-wrapped mocks without repeating the
// trait-object casts at every call site.
pub fn deps_from_mocks(
    profiles: Arc<InMemoryProfileStore>,
    ledger: Arc<InMemorySwipeLedger>,
    conversations: Arc<RecordingConversationService>,
    notifications: Arc<RecordingNotificationService>,
    random: Arc<dyn BaseRandomSource>,
) -> crate::kernel::deps::EngineDeps {
    crate::kernel::deps::EngineDeps::new(profiles, ledger, conversations, notifications, random)
}
