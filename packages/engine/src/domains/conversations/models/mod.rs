pub mod conversation;

pub use conversation::{ordered_pair, Conversation};
