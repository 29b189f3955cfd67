//! Scene-boundary side effects.
//!
//! The only cross-cutting policy in the sequencer: which media cue fires
//! when the narrative crosses from one scene to the next.

use keepsake_core::scene::Scene;
use serde::{Deserialize, Serialize};

/// Media effect applied when a transition starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryEffect {
    /// No media change.
    None,
    /// Start the ambient track, unless already started.
    StartAmbient,
    /// Stop the ambient track and play the climax once.
    StopAmbientPlayClimax,
}

/// Looks up the effect for crossing `from -> to`.
#[must_use]
pub fn boundary_effect(from: Scene, to: Scene) -> BoundaryEffect {
    match (from, to) {
        (Scene::Invitation, Scene::Gallery) => BoundaryEffect::StartAmbient,
        (Scene::Cake, Scene::Finale) => BoundaryEffect::StopAmbientPlayClimax,
        _ => BoundaryEffect::None,
    }
}
