//! Query handlers for the sequencer.
//!
//! Read-only projections of a running narrative. Nothing here feeds back
//! into the sequencer.

use keepsake_core::aggregate::AggregateRoot;
use keepsake_core::scene::Scene;
use serde::Serialize;
use uuid::Uuid;

use crate::application::runtime::Narrative;

/// Read-only view of a running narrative.
#[derive(Debug, Serialize)]
pub struct SequencerView {
    /// The sequencer identifier.
    pub sequencer_id: Uuid,
    /// The scene being shown (or being left, during a handoff).
    pub current_scene: Scene,
    /// `true` during the handoff window.
    pub transitioning: bool,
    /// Whether the ambient track is requested.
    pub ambient_playing: bool,
    /// Current version (event count).
    pub version: i64,
}

/// One mark of the progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndicatorMark {
    /// The scene this mark stands for.
    pub scene: Scene,
    /// `true` for the current scene only.
    pub active: bool,
}

/// Builds the view of `narrative`.
#[must_use]
pub fn get_view(narrative: &Narrative) -> SequencerView {
    let state = narrative.state();
    SequencerView {
        sequencer_id: narrative.sequencer().aggregate_id(),
        current_scene: state.current_scene,
        transitioning: state.transitioning,
        ambient_playing: narrative.media_state().ambient_playing,
        version: narrative.sequencer().version(),
    }
}

/// Projects `current` onto the five ordered progress marks.
#[must_use]
pub fn progress_indicator(current: Scene) -> [IndicatorMark; 5] {
    Scene::ALL.map(|scene| IndicatorMark {
        scene,
        active: scene == current,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use keepsake_media::{MediaAssets, MediaController};
    use keepsake_scenes::domain::signals::SceneInput;
    use keepsake_test_support::{ManualClock, RejectingMediaBackend};

    use super::*;
    use crate::domain::commands::HandleInput;

    #[test]
    fn test_progress_indicator_marks_only_the_current_scene() {
        let marks = progress_indicator(Scene::Reveal);

        let active: Vec<Scene> = marks.iter().filter(|m| m.active).map(|m| m.scene).collect();
        assert_eq!(active, vec![Scene::Reveal]);
        assert_eq!(marks.map(|m| m.scene), Scene::ALL);
    }

    #[test]
    fn test_get_view_reflects_requested_ambient_even_when_refused() {
        // Arrange
        let clock = Arc::new(ManualClock::new());
        let media = MediaController::new(
            Box::new(RejectingMediaBackend::new()),
            MediaAssets::default(),
        );
        let id = Uuid::new_v4();
        let mut narrative = Narrative::with_id(id, media, clock);

        // Act
        narrative
            .handle_input(&HandleInput::new(SceneInput::Tap))
            .unwrap();
        let view = get_view(&narrative);

        // Assert
        assert_eq!(view.sequencer_id, id);
        assert_eq!(view.current_scene, Scene::Invitation);
        assert!(view.transitioning);
        assert!(view.ambient_playing);
        assert_eq!(view.version, 2);
    }
}
