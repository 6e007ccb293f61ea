//! Pure candidate selection for a discovery session.
//!
//! This function contains NO side effects - it implements the business logic
//! for computing the eligible, ordered candidate pool from the full profile
//! set. Calling it again with identical inputs returns an identical sequence.

use std::collections::HashSet;

use crate::common::ProfileId;
use crate::domains::profiles::models::{Preferences, Profile};

/// Filter and order the profile set for a viewer.
///
/// Exclusions, in order:
/// - the viewer's own profile
/// - anyone already in the swipe ledger
/// - distance beyond `prefs.radius_miles`
/// - age outside the inclusive `prefs.age_range`
/// - purpose tag differing from the viewer's, when `strict_match` is set
/// - unverified profiles, when `verified_only` is set
///
/// The survivors are sorted ascending by distance. The sort is stable:
/// equidistant profiles keep the store's enumeration order, which is the
/// only tie-break the contract defines.
pub fn select_candidates(
    viewer: &Profile,
    all_profiles: &[Profile],
    decided_ids: &HashSet<ProfileId>,
    prefs: &Preferences,
) -> Vec<Profile> {
    let (min_age, max_age) = prefs.age_range;

    let mut candidates: Vec<Profile> = all_profiles
        .iter()
        .filter(|p| {
            if p.id == viewer.id {
                return false;
            }
            if decided_ids.contains(&p.id) {
                return false;
            }
            if p.distance_miles > prefs.radius_miles {
                return false;
            }
            if p.age < min_age || p.age > max_age {
                return false;
            }
            if prefs.strict_match && p.purpose != viewer.purpose {
                return false;
            }
            if prefs.verified_only && !p.verified {
                return false;
            }
            true
        })
        .cloned()
        .collect();

    candidates.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
    candidates
}
