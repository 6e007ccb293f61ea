use serde::{Deserialize, Serialize};

use crate::common::{ConversationId, ProfileId};

/// Matching domain events - FACT EVENTS ONLY
///
/// Immutable facts about what happened. The serialized event is the payload
/// of the MATCH notification handed to the notification collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MatchingEvent {
    /// A decision resolved into a mutual match.
    ///
    /// `conversation_id` is None when conversation creation failed; the
    /// match itself still stands.
    MatchCreated {
        viewer_id: ProfileId,
        candidate_id: ProfileId,
        conversation_id: Option<ConversationId>,
    },
}
