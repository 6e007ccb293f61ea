// Common types used across multiple domains and layers
//
// These types are shared between the discovery and matching domains to avoid
// circular dependencies while maintaining type safety.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a swipe decision on the current candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwipeDirection {
    /// Pass on the candidate (swipe left).
    Reject,
    /// Like the candidate (swipe right); matches with probability
    /// `MATCH_PROBABILITY`.
    Accept,
    /// Super-like the candidate (swipe up); always matches.
    SuperAccept,
}

/// Kind tag for notifications emitted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    Match,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Match => "MATCH",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
