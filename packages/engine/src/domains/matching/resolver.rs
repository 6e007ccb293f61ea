//! Match resolution - turns a forward decision into a match outcome.
//!
//! The probabilistic rule lives here and nowhere else. Entropy comes from an
//! injected source so resolver behavior is reproducible in tests.

use std::sync::Arc;

use crate::common::SwipeDirection;
use crate::kernel::traits::BaseRandomSource;

/// Probability that an Accept decision resolves into a match.
pub const MATCH_PROBABILITY: f64 = 0.4;

/// Resolves swipe decisions into match outcomes.
///
/// - Reject never matches.
/// - SuperAccept always matches.
/// - Accept matches when the next uniform draw lands below
///   `MATCH_PROBABILITY`.
#[derive(Clone)]
pub struct MatchResolver {
    random: Arc<dyn BaseRandomSource>,
}

impl MatchResolver {
    pub fn new(random: Arc<dyn BaseRandomSource>) -> Self {
        Self { random }
    }

    pub fn resolve(&self, direction: SwipeDirection) -> bool {
        match direction {
            SwipeDirection::Reject => false,
            SwipeDirection::SuperAccept => true,
            SwipeDirection::Accept => self.random.next_uniform() < MATCH_PROBABILITY,
        }
    }
}
