pub mod models;

pub use models::{ordered_pair, Conversation};
