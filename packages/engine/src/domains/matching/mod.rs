pub mod events;
pub mod resolver;

// Re-export commonly used types
pub use events::MatchingEvent;
pub use resolver::{MatchResolver, MATCH_PROBABILITY};
