pub mod actions;
pub mod models;
pub mod selector;
pub mod session;

// Re-export commonly used types
pub use selector::select_candidates;
pub use session::{Decision, DecisionSession, SessionError, SessionState};
