//! Rendering boundary.
//!
//! A failure while rendering one scene's decoration degrades to a short
//! textual fallback for that scene. It never reaches the sequencer.

use keepsake_core::scene::Scene;
use thiserror::Error;
use tracing::warn;

use super::controller::SceneFrame;

/// Reasons a renderer can fail.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The frame does not fit the output surface.
    #[error("layout failed: {0}")]
    Layout(String),

    /// A decorative asset could not be loaded.
    #[error("missing decorative asset: {0}")]
    MissingAsset(String),
}

/// Anything that can turn a frame into displayable text.
pub trait SceneRenderer {
    /// Renders one frame.
    ///
    /// # Errors
    ///
    /// Returns `RenderError` if the decoration cannot be produced.
    fn render(&mut self, frame: &SceneFrame) -> Result<String, RenderError>;
}

/// Shown while the handoff between two scenes is in progress.
pub const HANDOFF_TEXT: &str = "…";

const FINALE_FALLBACK: &str = concat!(
    "Happy Birthday, Somya!\n",
    "May your special day be filled with endless joy and beautiful memories!"
);

/// Minimal text for a scene whose decoration failed.
#[must_use]
pub fn fallback_text(scene: Scene) -> &'static str {
    match scene {
        Scene::Invitation => "For my dearest, Behli. Tap to unwrap your surprise.",
        Scene::Gallery => "Our Beautiful Journey",
        Scene::Reveal => "A little surprise for you...",
        Scene::Cake => "Make a Wish! Tap or swipe the cake to slice it.",
        Scene::Finale => FINALE_FALLBACK,
    }
}

/// Renders `frame`, substituting the scene's fallback text on failure.
pub fn render_or_fallback(renderer: &mut dyn SceneRenderer, frame: &SceneFrame) -> String {
    let Some(scene) = frame.scene() else {
        return renderer
            .render(frame)
            .unwrap_or_else(|_| HANDOFF_TEXT.to_owned());
    };
    match renderer.render(frame) {
        Ok(text) => text,
        Err(e) => {
            warn!(%scene, error = %e, "scene decoration failed, using fallback");
            fallback_text(scene).to_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::cake::CakePhase;
    use crate::domain::finale::FinalePhase;

    use super::*;

    struct BrokenRenderer;

    impl SceneRenderer for BrokenRenderer {
        fn render(&mut self, _frame: &SceneFrame) -> Result<String, RenderError> {
            Err(RenderError::MissingAsset("parchment.svg".into()))
        }
    }

    struct EchoRenderer;

    impl SceneRenderer for EchoRenderer {
        fn render(&mut self, frame: &SceneFrame) -> Result<String, RenderError> {
            Ok(format!("{frame:?}"))
        }
    }

    #[test]
    fn test_failed_render_degrades_to_scene_fallback() {
        let frame = SceneFrame::Finale {
            phase: FinalePhase::Message,
        };

        let text = render_or_fallback(&mut BrokenRenderer, &frame);

        assert_eq!(
            text,
            "Happy Birthday, Somya!\n\
             May your special day be filled with endless joy and beautiful memories!"
        );
    }

    #[test]
    fn test_successful_render_is_passed_through() {
        let frame = SceneFrame::Cake {
            phase: CakePhase::Whole,
        };

        let text = render_or_fallback(&mut EchoRenderer, &frame);

        assert_eq!(text, "Cake { phase: Whole }");
    }

    #[test]
    fn test_failed_handoff_render_shows_placeholder() {
        let text = render_or_fallback(&mut BrokenRenderer, &SceneFrame::Handoff);

        assert_eq!(text, HANDOFF_TEXT);
    }

    #[test]
    fn test_every_scene_has_nonempty_fallback() {
        assert!(Scene::ALL.iter().all(|s| !fallback_text(*s).is_empty()));
    }
}
