//! Commands accepted by the sequencer runtime.

use keepsake_scenes::domain::signals::SceneInput;
use uuid::Uuid;

/// Command to deliver one user input to the active scene.
#[derive(Debug, Clone, Copy)]
pub struct HandleInput {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The input itself.
    pub input: SceneInput,
}

impl HandleInput {
    /// Wraps `input` with a fresh correlation ID.
    #[must_use]
    pub fn new(input: SceneInput) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            input,
        }
    }
}
