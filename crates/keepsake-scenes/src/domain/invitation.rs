//! The gift box invitation.

use serde::Serialize;
use tracing::debug;

use super::signals::{SceneInput, SceneSignal};

/// Local state of the invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationPhase {
    /// The box is waiting to be opened.
    Closed,
    /// The box was tapped; the scene has asked to advance.
    Opening,
}

/// Controller for the invitation scene.
#[derive(Debug)]
pub struct Invitation {
    phase: InvitationPhase,
}

impl Default for Invitation {
    fn default() -> Self {
        Self::new()
    }
}

impl Invitation {
    /// Creates a closed invitation.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: InvitationPhase::Closed,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> InvitationPhase {
        self.phase
    }

    /// A single tap on the closed box opens it and advances.
    pub fn handle_input(&mut self, input: &SceneInput) -> Vec<SceneSignal> {
        match (self.phase, input) {
            (InvitationPhase::Closed, SceneInput::Tap) => {
                self.phase = InvitationPhase::Opening;
                vec![SceneSignal::Advance]
            }
            _ => {
                debug!(?input, phase = ?self.phase, "invitation ignored input");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tap_opens_and_advances_once() {
        // Arrange
        let mut invitation = Invitation::new();

        // Act
        let first = invitation.handle_input(&SceneInput::Tap);
        let second = invitation.handle_input(&SceneInput::Tap);

        // Assert
        assert_eq!(first, vec![SceneSignal::Advance]);
        assert!(second.is_empty());
        assert_eq!(invitation.phase(), InvitationPhase::Opening);
    }

    #[test]
    fn test_other_input_leaves_the_box_closed() {
        let mut invitation = Invitation::new();

        let signals = invitation.handle_input(&SceneInput::Continue);

        assert!(signals.is_empty());
        assert_eq!(invitation.phase(), InvitationPhase::Closed);
    }
}
