use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Hard bounds for the discovery age filter.
pub const MIN_AGE: i32 = 18;
pub const MAX_AGE: i32 = 99;

/// Error raised when a viewer's stored preferences are malformed.
///
/// Malformed preferences are an upstream bug; they are rejected outright
/// rather than clamped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PreferencesError {
    #[error("age range {min}-{max} is invalid: bounds must satisfy {MIN_AGE} <= min <= max <= {MAX_AGE}")]
    InvalidAgeRange { min: i32, max: i32 },

    #[error("distance radius must be positive, got {0}")]
    InvalidRadius(f64),
}

/// Gender filter option on the settings surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenderPreference {
    Male,
    Female,
    Everyone,
}

/// Discovery filter preferences, owned by the viewer's profile.
///
/// `gender_preference` is stored and surfaced in settings but the candidate
/// selector does not filter on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Maximum distance from the viewer, in miles.
    pub radius_miles: f64,
    /// Inclusive [min, max] age range.
    pub age_range: (i32, i32),
    /// Only show candidates with the same purpose tag as the viewer.
    pub strict_match: bool,
    /// Only show candidates with a verified photo/ID.
    pub verified_only: bool,
    pub gender_preference: Option<GenderPreference>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            radius_miles: 50.0,
            age_range: (18, 50),
            strict_match: false,
            verified_only: false,
            gender_preference: None,
        }
    }
}

impl Preferences {
    /// Build a validated preferences value.
    pub fn new(
        radius_miles: f64,
        age_range: (i32, i32),
        strict_match: bool,
        verified_only: bool,
        gender_preference: Option<GenderPreference>,
    ) -> Result<Self, PreferencesError> {
        let prefs = Self {
            radius_miles,
            age_range,
            strict_match,
            verified_only,
            gender_preference,
        };
        prefs.validate()?;
        Ok(prefs)
    }

    /// Check the invariants the selector relies on.
    pub fn validate(&self) -> Result<(), PreferencesError> {
        let (min, max) = self.age_range;
        if min < MIN_AGE || max > MAX_AGE || min > max {
            return Err(PreferencesError::InvalidAgeRange { min, max });
        }
        if !(self.radius_miles > 0.0) {
            return Err(PreferencesError::InvalidRadius(self.radius_miles));
        }
        Ok(())
    }
}
