pub mod deps;
pub mod random;
pub mod test_dependencies;
pub mod traits;

pub use deps::{
    EngineDeps, LogNotificationService, PgConversationService, PgProfileStore, PgSwipeLedger,
};
pub use random::{SeededRandomSource, ThreadRandomSource};
pub use traits::{
    BaseConversationService, BaseNotificationService, BaseProfileStore, BaseRandomSource,
    BaseSwipeLedger,
};
