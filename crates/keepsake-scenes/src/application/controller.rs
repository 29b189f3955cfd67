//! Dispatch over whichever scene is mounted.

use keepsake_core::clock::Clock;
use keepsake_core::scene::Scene;
use keepsake_core::scheduler::Scheduler;

use crate::domain::cake::{Cake, CakePhase};
use crate::domain::finale::{Finale, FinalePhase};
use crate::domain::gallery::{Gallery, PHOTOS, Photo};
use crate::domain::invitation::{Invitation, InvitationPhase};
use crate::domain::reveal::{Reveal, RevealPhase};
use crate::domain::signals::{SceneInput, SceneSignal, SceneTimer};

/// The mounted scene controller.
#[derive(Debug)]
pub enum SceneController {
    /// Gift box.
    Invitation(Invitation),
    /// Photo journey.
    Gallery(Gallery),
    /// Flower and video.
    Reveal(Reveal),
    /// Cake.
    Cake(Cake),
    /// Closing greeting.
    Finale(Finale),
}

/// Read-only projection of a controller, handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneFrame {
    /// Gift box.
    Invitation {
        /// Phase of the box.
        phase: InvitationPhase,
    },
    /// Photo journey.
    Gallery {
        /// All photos, in order.
        photos: &'static [Photo],
        /// The enlarged photo, if any.
        lightbox: Option<&'static Photo>,
    },
    /// Flower and video.
    Reveal {
        /// Phase of the flower.
        phase: RevealPhase,
    },
    /// Cake.
    Cake {
        /// Phase of the cut.
        phase: CakePhase,
    },
    /// Closing greeting.
    Finale {
        /// Whether the message has unfolded.
        phase: FinalePhase,
    },
    /// Nothing mounted; a scene handoff is in progress.
    Handoff,
}

impl SceneFrame {
    /// The scene this frame depicts, or `None` during a handoff.
    #[must_use]
    pub fn scene(&self) -> Option<Scene> {
        match self {
            SceneFrame::Invitation { .. } => Some(Scene::Invitation),
            SceneFrame::Gallery { .. } => Some(Scene::Gallery),
            SceneFrame::Reveal { .. } => Some(Scene::Reveal),
            SceneFrame::Cake { .. } => Some(Scene::Cake),
            SceneFrame::Finale { .. } => Some(Scene::Finale),
            SceneFrame::Handoff => None,
        }
    }
}

impl SceneController {
    /// Builds the entry-state controller for `scene`, scheduling whatever the
    /// scene starts on its own.
    pub fn mount<T: From<SceneTimer>>(
        scene: Scene,
        timers: &mut Scheduler<T>,
        clock: &dyn Clock,
    ) -> Self {
        match scene {
            Scene::Invitation => SceneController::Invitation(Invitation::new()),
            Scene::Gallery => SceneController::Gallery(Gallery::new()),
            Scene::Reveal => SceneController::Reveal(Reveal::new()),
            Scene::Cake => SceneController::Cake(Cake::new()),
            Scene::Finale => SceneController::Finale(Finale::mount(timers, clock)),
        }
    }

    /// The scene this controller runs.
    #[must_use]
    pub fn scene(&self) -> Scene {
        match self {
            SceneController::Invitation(_) => Scene::Invitation,
            SceneController::Gallery(_) => Scene::Gallery,
            SceneController::Reveal(_) => Scene::Reveal,
            SceneController::Cake(_) => Scene::Cake,
            SceneController::Finale(_) => Scene::Finale,
        }
    }

    /// Routes user input to the scene automaton.
    pub fn handle_input<T: From<SceneTimer>>(
        &mut self,
        input: &SceneInput,
        timers: &mut Scheduler<T>,
        clock: &dyn Clock,
    ) -> Vec<SceneSignal> {
        match self {
            SceneController::Invitation(scene) => scene.handle_input(input),
            SceneController::Gallery(scene) => scene.handle_input(input),
            SceneController::Reveal(scene) => scene.handle_input(input, timers, clock),
            SceneController::Cake(scene) => scene.handle_input(input, timers, clock),
            SceneController::Finale(_) => Vec::new(),
        }
    }

    /// Routes a due timer payload to the scene automaton.
    pub fn on_timer<T: From<SceneTimer>>(
        &mut self,
        timer: SceneTimer,
        timers: &mut Scheduler<T>,
        clock: &dyn Clock,
    ) -> Vec<SceneSignal> {
        match self {
            SceneController::Invitation(_) | SceneController::Gallery(_) => Vec::new(),
            SceneController::Reveal(scene) => scene.on_timer(timer),
            SceneController::Cake(scene) => scene.on_timer(timer, timers, clock),
            SceneController::Finale(scene) => scene.on_timer(timer),
        }
    }

    /// Cancels every timer the scene still has pending.
    pub fn teardown<T>(&mut self, timers: &mut Scheduler<T>) {
        match self {
            SceneController::Invitation(_) | SceneController::Gallery(_) => {}
            SceneController::Reveal(scene) => scene.teardown(timers),
            SceneController::Cake(scene) => scene.teardown(timers),
            SceneController::Finale(scene) => scene.teardown(timers),
        }
    }

    /// Projects the controller for rendering.
    #[must_use]
    pub fn frame(&self) -> SceneFrame {
        match self {
            SceneController::Invitation(scene) => SceneFrame::Invitation {
                phase: scene.phase(),
            },
            SceneController::Gallery(scene) => SceneFrame::Gallery {
                photos: &PHOTOS,
                lightbox: scene.lightbox(),
            },
            SceneController::Reveal(scene) => SceneFrame::Reveal {
                phase: scene.phase(),
            },
            SceneController::Cake(scene) => SceneFrame::Cake {
                phase: scene.phase(),
            },
            SceneController::Finale(scene) => SceneFrame::Finale {
                phase: scene.phase(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use keepsake_test_support::ManualClock;

    use super::*;

    #[test]
    fn test_mount_produces_entry_state_for_every_scene() {
        let clock = ManualClock::new();
        let mut timers: Scheduler<SceneTimer> = Scheduler::new();

        for scene in Scene::ALL {
            let controller = SceneController::mount(scene, &mut timers, &clock);
            assert_eq!(controller.scene(), scene);
            assert_eq!(controller.frame().scene(), Some(scene));
        }
        // Only the finale schedules on mount.
        assert_eq!(timers.len(), 1);
    }

    #[test]
    fn test_input_reaches_the_mounted_scene_only() {
        // Arrange
        let clock = ManualClock::new();
        let mut timers: Scheduler<SceneTimer> = Scheduler::new();
        let mut reveal = SceneController::mount(Scene::Reveal, &mut timers, &clock);

        // Act
        let continue_signals = reveal.handle_input(&SceneInput::Continue, &mut timers, &clock);
        let tap_signals = reveal.handle_input(&SceneInput::Tap, &mut timers, &clock);

        // Assert
        assert!(continue_signals.is_empty());
        assert!(tap_signals.is_empty());
        assert_eq!(
            reveal.frame(),
            SceneFrame::Reveal {
                phase: RevealPhase::Blooming
            }
        );
        assert_eq!(timers.len(), 1);
    }

    #[test]
    fn test_teardown_cancels_scene_timers() {
        let clock = ManualClock::new();
        let mut timers: Scheduler<SceneTimer> = Scheduler::new();
        let mut cake = SceneController::mount(Scene::Cake, &mut timers, &clock);
        cake.handle_input(&SceneInput::Tap, &mut timers, &clock);

        cake.teardown(&mut timers);

        assert!(timers.is_empty());
    }

    #[test]
    fn test_finale_ignores_input() {
        let clock = ManualClock::new();
        let mut timers: Scheduler<SceneTimer> = Scheduler::new();
        let mut finale = SceneController::mount(Scene::Finale, &mut timers, &clock);

        let signals = finale.handle_input(&SceneInput::ManualAdvance, &mut timers, &clock);

        assert!(signals.is_empty());
    }
}
