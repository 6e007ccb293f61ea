pub mod swipe_record;

pub use swipe_record::SwipeRecord;
