//! Swipe action - one forward decision with its side effects.

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::common::{ConversationId, NotificationKind, SwipeDirection};
use crate::domains::discovery::session::{DecisionSession, SessionError};
use crate::domains::matching::MatchingEvent;
use crate::domains::profiles::models::Profile;
use crate::kernel::EngineDeps;

/// What one swipe produced.
#[derive(Debug, Clone)]
pub struct SwipeOutcome {
    pub candidate: Profile,
    pub direction: SwipeDirection,
    pub matched: bool,
    /// Present when the match's conversation was created (or already
    /// existed); None on no match or when conversation creation failed.
    pub conversation_id: Option<ConversationId>,
}

/// Apply a decision to the session's current candidate.
///
/// Order of effects: the ledger write comes first so the decision is a
/// durable fact before anything else happens, then the session transition,
/// then match resolution. Conversation creation and the MATCH notification
/// are allowed to fail without failing the swipe - the user's action must
/// never appear stuck, and the ledger entry is never rolled back.
pub async fn swipe(
    session: &mut DecisionSession,
    direction: SwipeDirection,
    deps: &EngineDeps,
) -> Result<SwipeOutcome> {
    let viewer_id = session.viewer_id();
    let candidate_id = session
        .current()
        .map(|c| c.id)
        .ok_or(SessionError::SessionExhausted)?;

    deps.ledger.mark_decided(viewer_id, candidate_id).await?;

    let decision = session.decide(direction)?;
    let matched = deps.resolver.resolve(direction);

    debug!(
        viewer_id = %viewer_id,
        candidate_id = %candidate_id,
        ?direction,
        matched,
        cursor = session.cursor(),
        "Decision applied"
    );

    let mut conversation_id = None;
    if matched {
        match deps
            .conversations
            .create_or_get_conversation(viewer_id, candidate_id)
            .await
        {
            Ok(id) => conversation_id = Some(id),
            Err(error) => warn!(
                viewer_id = %viewer_id,
                candidate_id = %candidate_id,
                %error,
                "Conversation creation failed; match stands"
            ),
        }

        let event = MatchingEvent::MatchCreated {
            viewer_id,
            candidate_id,
            conversation_id,
        };
        match serde_json::to_value(&event) {
            Ok(payload) => {
                if let Err(error) = deps
                    .notifications
                    .notify(viewer_id, NotificationKind::Match, payload)
                    .await
                {
                    warn!(%error, "Match notification failed; swipe completes anyway");
                }
            }
            Err(error) => warn!(%error, "Match event failed to serialize"),
        }

        info!(
            viewer_id = %viewer_id,
            candidate_id = %candidate_id,
            ?conversation_id,
            "Match created"
        );
    }

    Ok(SwipeOutcome {
        candidate: decision.candidate,
        direction,
        matched,
        conversation_id,
    })
}
