//! Decision session state machine - pure decision loop state
//!
//! Holds the ordered candidate list for one Discovery viewing, the cursor,
//! and the history backing single-step undo. No IO: ledger writes and match
//! side effects are orchestrated around this by the swipe action.
//!
//! Not designed for concurrent mutation; a session belongs to exactly one
//! UI surface and callers serialize `decide`/`undo`.

use thiserror::Error;

use crate::common::{ProfileId, SwipeDirection};
use crate::domains::profiles::models::Profile;

/// The only core-specific error: misuse of the state machine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("decision session is exhausted: no current candidate")]
    SessionExhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// The cursor points at a candidate.
    Active,
    /// Every candidate has been decided on. Terminal: a new session must be
    /// created to continue discovering.
    Exhausted,
}

/// One forward decision, as kept on the undo history.
#[derive(Debug, Clone)]
pub struct Decision {
    pub candidate: Profile,
    pub direction: SwipeDirection,
}

/// Ephemeral cursor over the candidate list produced at session start.
///
/// Invariant: `0 <= cursor <= candidates.len()`; the candidate list never
/// changes for the lifetime of the session.
#[derive(Debug)]
pub struct DecisionSession {
    viewer_id: ProfileId,
    candidates: Vec<Profile>,
    cursor: usize,
    history: Vec<Decision>,
}

impl DecisionSession {
    pub fn new(viewer_id: ProfileId, candidates: Vec<Profile>) -> Self {
        Self {
            viewer_id,
            candidates,
            cursor: 0,
            history: Vec::new(),
        }
    }

    pub fn viewer_id(&self) -> ProfileId {
        self.viewer_id
    }

    pub fn state(&self) -> SessionState {
        if self.cursor >= self.candidates.len() {
            SessionState::Exhausted
        } else {
            SessionState::Active
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.state() == SessionState::Exhausted
    }

    /// The candidate under the cursor, or `None` once exhausted.
    pub fn current(&self) -> Option<&Profile> {
        self.candidates.get(self.cursor)
    }

    /// The candidate after the current one, for pre-rendering the next card.
    /// Never advances the cursor.
    pub fn peek_next(&self) -> Option<&Profile> {
        self.candidates.get(self.cursor + 1)
    }

    /// Apply a decision to the current candidate: push it onto the undo
    /// history and advance the cursor. Cursor and history change together;
    /// no partial state is observable.
    pub fn decide(&mut self, direction: SwipeDirection) -> Result<Decision, SessionError> {
        let candidate = self
            .candidates
            .get(self.cursor)
            .ok_or(SessionError::SessionExhausted)?
            .clone();

        let decision = Decision {
            candidate,
            direction,
        };
        self.history.push(decision.clone());
        self.cursor += 1;
        Ok(decision)
    }

    /// Step back exactly one decision, returning it, or `None` when there is
    /// nothing to undo.
    ///
    /// This rewinds only the visible cursor: the swipe ledger entry stands,
    /// and a match that already fired is not reversed.
    pub fn undo(&mut self) -> Option<Decision> {
        if self.history.is_empty() || self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.history.pop()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Candidates not yet decided on, including the current one.
    pub fn remaining(&self) -> usize {
        self.candidates.len() - self.cursor
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}
