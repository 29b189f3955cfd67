//! Journal events for the sequencer.

use keepsake_core::event::{DomainEvent, EventMetadata};
use keepsake_core::scene::Scene;
use serde::{Deserialize, Serialize};

use super::boundary::BoundaryEffect;

/// Emitted when a handoff begins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionStarted {
    /// The scene being left.
    pub from: Scene,
    /// The scene being entered.
    pub to: Scene,
}

/// Emitted when a boundary media cue is applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundaryEffectApplied {
    /// The cue.
    pub effect: BoundaryEffect,
}

/// Emitted when a handoff completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneEntered {
    /// The newly current scene.
    pub scene: Scene,
}

/// Emitted when a scene reports that it revealed its media.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaRevealed {
    /// The scene that revealed media.
    pub scene: Scene,
}

/// Emitted when the cake celebration begins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CelebrationStarted {
    /// Length of the celebration.
    pub duration_ms: i64,
}

/// Emitted when the host tears the sequencer down.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TornDown {
    /// The scene that was current at teardown.
    pub scene: Scene,
}

/// Event payload variants for the sequencer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SequencerEventKind {
    /// A handoff has begun.
    TransitionStarted(TransitionStarted),
    /// A boundary media cue was applied.
    BoundaryEffectApplied(BoundaryEffectApplied),
    /// A handoff has completed.
    SceneEntered(SceneEntered),
    /// A scene revealed its media.
    MediaRevealed(MediaRevealed),
    /// The celebration started.
    CelebrationStarted(CelebrationStarted),
    /// The sequencer was torn down.
    TornDown(TornDown),
}

/// Journal event envelope for the sequencer.
#[derive(Debug, Clone)]
pub struct SequencerEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: SequencerEventKind,
}

impl SequencerEventKind {
    /// The type name recorded in metadata.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            SequencerEventKind::TransitionStarted(_) => "sequencer.transition_started",
            SequencerEventKind::BoundaryEffectApplied(_) => "sequencer.boundary_effect_applied",
            SequencerEventKind::SceneEntered(_) => "sequencer.scene_entered",
            SequencerEventKind::MediaRevealed(_) => "sequencer.media_revealed",
            SequencerEventKind::CelebrationStarted(_) => "sequencer.celebration_started",
            SequencerEventKind::TornDown(_) => "sequencer.torn_down",
        }
    }
}

impl DomainEvent for SequencerEvent {
    fn event_type(&self) -> &'static str {
        self.kind.type_name()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("SequencerEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
