//! Integration tests for the discovery swipe flow, wired over the in-memory
//! collaborators.

use std::sync::Arc;

use engine_core::common::{NotificationKind, ProfileId, SwipeDirection};
use engine_core::domains::discovery::actions::{start_session, swipe};
use engine_core::domains::discovery::session::SessionError;
use engine_core::domains::profiles::models::{Preferences, Profile, Purpose};
use engine_core::kernel::test_dependencies::{
    deps_from_mocks, FixedRandomSource, InMemoryProfileStore, InMemorySwipeLedger,
    RecordingConversationService, RecordingNotificationService, ScriptedRandomSource,
};
use engine_core::kernel::{BaseProfileStore, BaseRandomSource, BaseSwipeLedger, EngineDeps};

fn profile(name: &str, distance_miles: f64, age: i32) -> Profile {
    Profile {
        id: ProfileId::new(),
        display_name: name.to_string(),
        age,
        gender: None,
        purpose: Purpose::Hangout,
        bio: String::new(),
        location_name: "Downtown".to_string(),
        distance_miles,
        interests: vec![],
        image_urls: vec![],
        verified: false,
    }
}

struct Harness {
    viewer: Profile,
    profiles: Arc<InMemoryProfileStore>,
    ledger: Arc<InMemorySwipeLedger>,
    conversations: Arc<RecordingConversationService>,
    notifications: Arc<RecordingNotificationService>,
}

impl Harness {
    fn new(candidates: Vec<Profile>) -> Self {
        Self::with_services(
            candidates,
            RecordingConversationService::new(),
            RecordingNotificationService::new(),
        )
    }

    fn with_services(
        candidates: Vec<Profile>,
        conversations: RecordingConversationService,
        notifications: RecordingNotificationService,
    ) -> Self {
        let viewer = profile("viewer", 0.0, 28);
        let mut store = InMemoryProfileStore::new().with_profile(viewer.clone(), Preferences::default());
        for candidate in candidates {
            store = store.with_profile(candidate, Preferences::default());
        }
        Self {
            viewer,
            profiles: Arc::new(store),
            ledger: Arc::new(InMemorySwipeLedger::new()),
            conversations: Arc::new(conversations),
            notifications: Arc::new(notifications),
        }
    }

    fn deps(&self, random: Arc<dyn BaseRandomSource>) -> EngineDeps {
        deps_from_mocks(
            self.profiles.clone(),
            self.ledger.clone(),
            self.conversations.clone(),
            self.notifications.clone(),
            random,
        )
    }
}

#[tokio::test]
async fn session_applies_stored_preferences() {
    let harness = Harness::new(vec![
        profile("A", 5.0, 25),
        profile("B", 20.0, 25),
        profile("C", 2.0, 40),
    ]);
    let mut prefs = Preferences::default();
    prefs.radius_miles = 10.0;
    prefs.age_range = (20, 30);
    harness
        .profiles
        .upsert_profile(&harness.viewer, &prefs)
        .await
        .unwrap();

    let deps = harness.deps(Arc::new(FixedRandomSource(0.9)));
    let session = start_session(harness.viewer.id, &deps).await.unwrap();

    assert_eq!(session.len(), 1);
    assert_eq!(session.current().unwrap().display_name, "A");
}

#[tokio::test]
async fn reject_writes_ledger_and_advances_without_matching() {
    let harness = Harness::new(vec![profile("A", 1.0, 25), profile("B", 2.0, 25)]);
    let deps = harness.deps(Arc::new(FixedRandomSource(0.0)));
    let mut session = start_session(harness.viewer.id, &deps).await.unwrap();
    let candidate_id = session.current().unwrap().id;

    let outcome = swipe(&mut session, SwipeDirection::Reject, &deps).await.unwrap();

    assert!(!outcome.matched);
    assert!(outcome.conversation_id.is_none());
    assert_eq!(session.cursor(), 1);
    assert!(harness.ledger.contains(harness.viewer.id, candidate_id));
    assert_eq!(harness.conversations.call_count(), 0);
    assert_eq!(harness.notifications.sent_count(), 0);
}

#[tokio::test]
async fn undo_restores_cursor_but_leaves_the_ledger_alone() {
    let harness = Harness::new(vec![profile("A", 1.0, 25), profile("B", 2.0, 25)]);
    let deps = harness.deps(Arc::new(FixedRandomSource(0.9)));
    let mut session = start_session(harness.viewer.id, &deps).await.unwrap();
    let first_id = session.current().unwrap().id;

    swipe(&mut session, SwipeDirection::Reject, &deps).await.unwrap();
    assert_eq!(session.cursor(), 1);

    let undone = session.undo().unwrap();
    assert_eq!(undone.candidate.id, first_id);
    assert_eq!(session.cursor(), 0);
    assert_eq!(session.history_len(), 0);

    // The decided fact is durable even though the card came back
    assert!(harness.ledger.contains(harness.viewer.id, first_id));
}

#[tokio::test]
async fn undone_match_is_not_reversed() {
    let harness = Harness::new(vec![profile("A", 1.0, 25), profile("B", 2.0, 25)]);
    let deps = harness.deps(Arc::new(FixedRandomSource(0.9)));
    let mut session = start_session(harness.viewer.id, &deps).await.unwrap();
    let first_id = session.current().unwrap().id;

    let outcome = swipe(&mut session, SwipeDirection::SuperAccept, &deps).await.unwrap();
    assert!(outcome.matched);
    session.undo().unwrap();

    // No take-backs: the conversation and notification stand
    assert_eq!(harness.conversations.created_count(), 1);
    assert!(harness
        .conversations
        .conversation_for(harness.viewer.id, first_id)
        .is_some());
    assert_eq!(harness.notifications.sent_count(), 1);
}

#[tokio::test]
async fn super_accept_always_matches_and_creates_a_conversation() {
    let harness = Harness::new(vec![profile("A", 1.0, 25)]);
    // Entropy that would sink a plain accept
    let deps = harness.deps(Arc::new(FixedRandomSource(0.99)));
    let mut session = start_session(harness.viewer.id, &deps).await.unwrap();
    let candidate_id = session.current().unwrap().id;

    let outcome = swipe(&mut session, SwipeDirection::SuperAccept, &deps).await.unwrap();

    assert!(outcome.matched);
    let conversation = harness
        .conversations
        .conversation_for(harness.viewer.id, candidate_id)
        .unwrap();
    assert_eq!(outcome.conversation_id, Some(conversation));

    let sent = harness.notifications.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, harness.viewer.id);
    assert_eq!(sent[0].1, NotificationKind::Match);
    let payload = sent[0].2["MatchCreated"].clone();
    assert_eq!(
        payload["candidate_id"].as_str().unwrap(),
        candidate_id.to_string()
    );
}

#[tokio::test]
async fn accept_matches_exactly_when_the_draw_is_below_probability() {
    let harness = Harness::new(vec![profile("A", 1.0, 25), profile("B", 2.0, 25)]);
    let deps = harness.deps(Arc::new(ScriptedRandomSource::new([0.39, 0.41])));
    let mut session = start_session(harness.viewer.id, &deps).await.unwrap();

    let first = swipe(&mut session, SwipeDirection::Accept, &deps).await.unwrap();
    assert!(first.matched);

    let second = swipe(&mut session, SwipeDirection::Accept, &deps).await.unwrap();
    assert!(!second.matched);

    assert_eq!(harness.conversations.created_count(), 1);
}

#[tokio::test]
async fn ledger_mark_is_idempotent() {
    let harness = Harness::new(vec![]);
    let candidate_id = ProfileId::new();

    harness
        .ledger
        .mark_decided(harness.viewer.id, candidate_id)
        .await
        .unwrap();
    harness
        .ledger
        .mark_decided(harness.viewer.id, candidate_id)
        .await
        .unwrap();

    assert_eq!(harness.ledger.mark_calls().len(), 2);
    assert_eq!(harness.ledger.decided_count(), 1);
    let ids = harness.ledger.decided_ids(harness.viewer.id).await.unwrap();
    assert_eq!(ids.len(), 1);
}

#[tokio::test]
async fn duplicate_match_across_sessions_creates_one_conversation() {
    // Two devices open sessions before either swipes
    let harness = Harness::new(vec![profile("A", 1.0, 25)]);
    let deps = harness.deps(Arc::new(FixedRandomSource(0.9)));
    let mut first = start_session(harness.viewer.id, &deps).await.unwrap();
    let mut second = start_session(harness.viewer.id, &deps).await.unwrap();

    let a = swipe(&mut first, SwipeDirection::SuperAccept, &deps).await.unwrap();
    let b = swipe(&mut second, SwipeDirection::SuperAccept, &deps).await.unwrap();

    assert!(a.matched && b.matched);
    assert_eq!(harness.conversations.call_count(), 2);
    assert_eq!(harness.conversations.created_count(), 1);
    assert_eq!(a.conversation_id, b.conversation_id);
    // Ledger absorbed the double write
    assert_eq!(harness.ledger.decided_count(), 1);
}

#[tokio::test]
async fn conversation_failure_does_not_fail_the_swipe() {
    let harness = Harness::with_services(
        vec![profile("A", 1.0, 25)],
        RecordingConversationService::new().with_failure(),
        RecordingNotificationService::new(),
    );
    let deps = harness.deps(Arc::new(FixedRandomSource(0.9)));
    let mut session = start_session(harness.viewer.id, &deps).await.unwrap();
    let candidate_id = session.current().unwrap().id;

    let outcome = swipe(&mut session, SwipeDirection::SuperAccept, &deps).await.unwrap();

    assert!(outcome.matched);
    assert!(outcome.conversation_id.is_none());
    assert_eq!(session.cursor(), 1);
    assert!(harness.ledger.contains(harness.viewer.id, candidate_id));
    // The notification still went out, with a null conversation id
    assert_eq!(harness.notifications.sent_count(), 1);
}

#[tokio::test]
async fn notification_failure_does_not_fail_the_swipe() {
    let harness = Harness::with_services(
        vec![profile("A", 1.0, 25)],
        RecordingConversationService::new(),
        RecordingNotificationService::new().with_failure(),
    );
    let deps = harness.deps(Arc::new(FixedRandomSource(0.9)));
    let mut session = start_session(harness.viewer.id, &deps).await.unwrap();

    let outcome = swipe(&mut session, SwipeDirection::SuperAccept, &deps).await.unwrap();

    assert!(outcome.matched);
    assert_eq!(harness.conversations.created_count(), 1);
    assert_eq!(session.cursor(), 1);
}

#[tokio::test]
async fn swiping_an_exhausted_session_is_invalid_state() {
    let harness = Harness::new(vec![profile("A", 1.0, 25)]);
    let deps = harness.deps(Arc::new(FixedRandomSource(0.9)));
    let mut session = start_session(harness.viewer.id, &deps).await.unwrap();

    swipe(&mut session, SwipeDirection::Reject, &deps).await.unwrap();
    assert!(session.is_exhausted());

    let marks_before = harness.ledger.mark_calls().len();
    let err = swipe(&mut session, SwipeDirection::Accept, &deps).await.unwrap_err();
    assert_eq!(
        err.downcast_ref::<SessionError>(),
        Some(&SessionError::SessionExhausted)
    );
    // Failed precondition: no ledger write happened
    assert_eq!(harness.ledger.mark_calls().len(), marks_before);
}

#[tokio::test]
async fn recreated_session_excludes_already_decided_candidates() {
    let harness = Harness::new(vec![profile("A", 1.0, 25), profile("B", 2.0, 25)]);
    let deps = harness.deps(Arc::new(FixedRandomSource(0.9)));

    let mut session = start_session(harness.viewer.id, &deps).await.unwrap();
    assert_eq!(session.len(), 2);
    swipe(&mut session, SwipeDirection::Reject, &deps).await.unwrap();

    let fresh = start_session(harness.viewer.id, &deps).await.unwrap();
    assert_eq!(fresh.len(), 1);
    assert_eq!(fresh.current().unwrap().display_name, "B");
}

#[tokio::test]
async fn malformed_stored_preferences_fail_session_start() {
    let harness = Harness::new(vec![profile("A", 1.0, 25)]);
    let mut bad = Preferences::default();
    bad.age_range = (40, 30);
    harness
        .profiles
        .upsert_profile(&harness.viewer, &bad)
        .await
        .unwrap();

    let deps = harness.deps(Arc::new(FixedRandomSource(0.9)));
    assert!(start_session(harness.viewer.id, &deps).await.is_err());
}

#[tokio::test]
async fn unknown_viewer_fails_session_start() {
    let harness = Harness::new(vec![]);
    let deps = harness.deps(Arc::new(FixedRandomSource(0.9)));
    assert!(start_session(ProfileId::new(), &deps).await.is_err());
}
