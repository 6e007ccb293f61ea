//! Start session action - builds a decision session for a viewer.

use anyhow::{Context, Result};
use tracing::info;

use crate::common::ProfileId;
use crate::domains::discovery::selector::select_candidates;
use crate::domains::discovery::session::DecisionSession;
use crate::kernel::EngineDeps;

/// Build a fresh decision session for the viewer.
///
/// Reads the viewer's profile and preferences, the full profile set, and the
/// swipe ledger, then runs the selector. The session holds the resulting
/// candidate list for its whole lifetime; the caller recreates the session
/// when the viewer changes filters or reopens Discovery.
pub async fn start_session(viewer_id: ProfileId, deps: &EngineDeps) -> Result<DecisionSession> {
    let viewer = deps
        .profiles
        .get_profile(viewer_id)
        .await?
        .with_context(|| format!("viewer profile {viewer_id} not found"))?;

    let prefs = deps.profiles.get_preferences(viewer_id).await?;
    prefs
        .validate()
        .context("viewer has malformed stored preferences")?;

    let all_profiles = deps.profiles.get_all_profiles().await?;
    let decided_ids = deps.ledger.decided_ids(viewer_id).await?;

    let candidates = select_candidates(&viewer, &all_profiles, &decided_ids, &prefs);

    info!(
        viewer_id = %viewer_id,
        pool_size = all_profiles.len(),
        already_decided = decided_ids.len(),
        candidates = candidates.len(),
        "Discovery session started"
    );

    Ok(DecisionSession::new(viewer_id, candidates))
}
