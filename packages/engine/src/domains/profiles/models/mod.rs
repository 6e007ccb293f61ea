pub mod preferences;
pub mod profile;
pub mod purpose;

pub use preferences::{GenderPreference, Preferences, PreferencesError};
pub use profile::Profile;
pub use purpose::Purpose;
