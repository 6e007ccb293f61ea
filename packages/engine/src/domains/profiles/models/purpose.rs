use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// What a member is looking for on the app.
///
/// The display strings double as the stored representation, so renaming a
/// variant is a data migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Purpose {
    #[serde(rename = "Concert Partner")]
    ConcertPartner,
    #[serde(rename = "Coffee Date")]
    CoffeeDate,
    #[serde(rename = "Exercise Buddy")]
    ExerciseBuddy,
    #[serde(rename = "Study Together")]
    StudyTogether,
    #[serde(rename = "Hangout")]
    Hangout,
    #[serde(rename = "Event Companion")]
    EventCompanion,
}

impl Purpose {
    pub const ALL: [Purpose; 6] = [
        Purpose::ConcertPartner,
        Purpose::CoffeeDate,
        Purpose::ExerciseBuddy,
        Purpose::StudyTogether,
        Purpose::Hangout,
        Purpose::EventCompanion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Purpose::ConcertPartner => "Concert Partner",
            Purpose::CoffeeDate => "Coffee Date",
            Purpose::ExerciseBuddy => "Exercise Buddy",
            Purpose::StudyTogether => "Study Together",
            Purpose::Hangout => "Hangout",
            Purpose::EventCompanion => "Event Companion",
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown purpose tag: {0}")]
pub struct UnknownPurpose(pub String);

impl FromStr for Purpose {
    type Err = UnknownPurpose;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPurpose(s.to_string()))
    }
}
