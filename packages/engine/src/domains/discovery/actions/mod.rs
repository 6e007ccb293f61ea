pub mod start_session;
pub mod swipe;

pub use start_session::start_session;
pub use swipe::{swipe, SwipeOutcome};
