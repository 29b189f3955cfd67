//! The event contract between scene controllers and the sequencer.

use serde::{Deserialize, Serialize};

/// User input delivered to the active scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneInput {
    /// A tap or click on the scene's main element.
    Tap,
    /// A completed drag or swipe with its total displacement in pixels.
    Swipe {
        /// Horizontal displacement.
        dx: f32,
        /// Vertical displacement.
        dy: f32,
    },
    /// The gallery's continue control.
    Continue,
    /// Enlarge one gallery photo.
    OpenPhoto {
        /// Photo identifier.
        id: u8,
    },
    /// Close the enlarged gallery photo.
    ClosePhoto,
    /// The reveal video reached its natural end.
    VideoEnded,
    /// The user closed the reveal video.
    DismissVideo,
    /// The cake's always-available fallback control.
    ManualAdvance,
}

/// Events a scene emits towards the sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneSignal {
    /// The scene reached its terminal state and asks to move on.
    Advance,
    /// The reveal scene is now showing its video.
    MediaRevealed,
    /// The cake was sliced and the celebration effect began.
    CelebrationStarted {
        /// How long the effect runs before the scene advances.
        duration_ms: i64,
    },
}

/// Delayed payloads scenes schedule for themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneTimer {
    /// The reveal flower finished blooming.
    BloomComplete,
    /// The cake knife finished its cut.
    SliceComplete,
    /// The confetti celebration finished.
    CelebrationComplete,
    /// The finale's personal message is ready to unfold.
    MessageReveal,
}
