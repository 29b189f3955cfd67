//! Media backend abstraction.
//!
//! The platform that actually produces sound and video sits behind
//! [`MediaBackend`]. Playback may be refused (autoplay policy, missing
//! asset); callers treat every refusal as non-fatal.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The three media slots the sequencer drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Track {
    /// Looping background music.
    Ambient,
    /// One-shot celebratory song.
    Climax,
    /// Inline video shown by the reveal scene.
    Video,
}

/// How a cue should be played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackMode {
    /// Restart from the beginning when the asset ends.
    Looping,
    /// Play once and stop.
    OneShot,
    /// Play once without sound.
    MutedOneShot,
}

/// A request to start playing an asset in a given slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackCue {
    /// The slot being played.
    pub track: Track,
    /// Location of the asset.
    pub source: PathBuf,
    /// Playback mode.
    pub mode: PlaybackMode,
}

/// Reasons a backend can refuse to play.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlaybackError {
    /// The platform rejected playback (e.g. autoplay policy).
    #[error("playback rejected: {0}")]
    Rejected(String),

    /// The asset could not be found or opened.
    #[error("asset unavailable: {}", .0.display())]
    AssetUnavailable(PathBuf),
}

/// Port for the platform media layer.
pub trait MediaBackend: Send {
    /// Begins playing `cue`. May be refused.
    ///
    /// # Errors
    ///
    /// Returns `PlaybackError` when the platform refuses playback.
    fn play(&mut self, cue: &TrackCue) -> Result<(), PlaybackError>;

    /// Pauses whatever is playing in `track`. Pausing an idle slot is a no-op.
    fn pause(&mut self, track: Track);
}
