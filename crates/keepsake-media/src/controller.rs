//! The media controller.

use keepsake_core::media::{MediaBackend, Track};
use serde::Serialize;
use tracing::{debug, info};

use crate::assets::MediaAssets;

/// What the controller has asked the backend to do.
///
/// Flags reflect requests, not confirmed playback: a refused `play` still
/// leaves its flag set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MediaState {
    /// The ambient track has been requested and not stopped since.
    pub ambient_playing: bool,
    /// The climax track has been requested.
    pub climax_requested: bool,
    /// The reveal video has been requested and not stopped since.
    pub video_playing: bool,
}

/// Drives the ambient track, the climax track and the reveal video.
pub struct MediaController {
    backend: Box<dyn MediaBackend>,
    assets: MediaAssets,
    state: MediaState,
}

impl std::fmt::Debug for MediaController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaController")
            .field("assets", &self.assets)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl MediaController {
    /// Creates a controller with nothing playing.
    #[must_use]
    pub fn new(backend: Box<dyn MediaBackend>, assets: MediaAssets) -> Self {
        Self {
            backend,
            assets,
            state: MediaState::default(),
        }
    }

    /// Current request state.
    #[must_use]
    pub fn state(&self) -> MediaState {
        self.state
    }

    /// Starts the looping ambient track unless it is already requested.
    pub fn start_ambient(&mut self) {
        if self.state.ambient_playing {
            debug!("ambient already requested");
            return;
        }
        self.attempt(Track::Ambient);
        self.state.ambient_playing = true;
    }

    /// Pauses the ambient track if it is playing. Always clears the flag.
    pub fn stop_ambient(&mut self) {
        if self.state.ambient_playing {
            self.backend.pause(Track::Ambient);
            info!("ambient stopped");
        }
        self.state.ambient_playing = false;
    }

    /// Stops the ambient track unconditionally, then plays the climax once.
    pub fn play_climax(&mut self) {
        self.stop_ambient();
        self.attempt(Track::Climax);
        self.state.climax_requested = true;
    }

    /// Starts the inline reveal video unless it is already playing.
    pub fn play_video(&mut self) {
        if self.state.video_playing {
            return;
        }
        self.attempt(Track::Video);
        self.state.video_playing = true;
    }

    /// Pauses the reveal video if it is playing.
    pub fn stop_video(&mut self) {
        if self.state.video_playing {
            self.backend.pause(Track::Video);
        }
        self.state.video_playing = false;
    }

    /// Pauses everything that was requested. Used when the host unmounts.
    pub fn shutdown(&mut self) {
        self.stop_ambient();
        self.stop_video();
        if self.state.climax_requested {
            self.backend.pause(Track::Climax);
        }
        info!("media shut down");
    }

    fn attempt(&mut self, track: Track) {
        let cue = self.assets.cue(track);
        match self.backend.play(&cue) {
            Ok(()) => info!(?track, source = %cue.source.display(), "playback started"),
            Err(e) => debug!(?track, error = %e, "playback refused, continuing without it"),
        }
    }
}

#[cfg(test)]
mod tests {
    use keepsake_core::media::Track;
    use keepsake_test_support::{MediaCall, RecordingMediaBackend, RejectingMediaBackend};

    use super::*;

    fn recording_controller() -> (MediaController, RecordingMediaBackend) {
        let backend = RecordingMediaBackend::new();
        let controller = MediaController::new(Box::new(backend.clone()), MediaAssets::default());
        (controller, backend)
    }

    #[test]
    fn test_start_ambient_is_idempotent() {
        // Arrange
        let (mut media, backend) = recording_controller();

        // Act
        media.start_ambient();
        media.start_ambient();

        // Assert
        assert!(media.state().ambient_playing);
        assert_eq!(backend.play_count(Track::Ambient), 1);
    }

    #[test]
    fn test_rejected_ambient_is_swallowed_and_still_marked_requested() {
        // Arrange
        let backend = RejectingMediaBackend::new();
        let mut media = MediaController::new(Box::new(backend.clone()), MediaAssets::default());

        // Act
        media.start_ambient();

        // Assert
        assert!(media.state().ambient_playing);
        assert_eq!(backend.calls().len(), 1);
    }

    #[test]
    fn test_stop_ambient_only_pauses_when_playing() {
        let (mut media, backend) = recording_controller();

        media.stop_ambient();
        media.start_ambient();
        media.stop_ambient();
        media.stop_ambient();

        assert!(!media.state().ambient_playing);
        assert_eq!(backend.pause_count(Track::Ambient), 1);
    }

    #[test]
    fn test_play_climax_with_ambient_on_stops_it_first() {
        // Arrange
        let (mut media, backend) = recording_controller();
        media.start_ambient();

        // Act
        media.play_climax();

        // Assert
        assert!(!media.state().ambient_playing);
        assert!(media.state().climax_requested);
        let calls = backend.calls();
        let pause_at = calls
            .iter()
            .position(|c| *c == MediaCall::Pause(Track::Ambient))
            .unwrap();
        let climax_at = calls
            .iter()
            .position(|c| matches!(c, MediaCall::Play(cue) if cue.track == Track::Climax))
            .unwrap();
        assert!(pause_at < climax_at);
    }

    #[test]
    fn test_play_climax_with_ambient_off_has_same_post_condition() {
        let (mut media, backend) = recording_controller();

        media.play_climax();

        assert!(!media.state().ambient_playing);
        assert_eq!(backend.pause_count(Track::Ambient), 0);
        assert_eq!(backend.play_count(Track::Climax), 1);
    }

    #[test]
    fn test_rejected_climax_still_clears_ambient() {
        let backend = RejectingMediaBackend::new();
        let mut media = MediaController::new(Box::new(backend), MediaAssets::default());
        media.start_ambient();

        media.play_climax();

        assert!(!media.state().ambient_playing);
        assert!(media.state().climax_requested);
    }

    #[test]
    fn test_shutdown_pauses_everything_requested() {
        // Arrange
        let (mut media, backend) = recording_controller();
        media.start_ambient();
        media.play_video();

        // Act
        media.shutdown();

        // Assert
        assert_eq!(media.state(), MediaState::default());
        assert_eq!(backend.pause_count(Track::Ambient), 1);
        assert_eq!(backend.pause_count(Track::Video), 1);
        assert_eq!(backend.pause_count(Track::Climax), 0);
    }

    #[test]
    fn test_video_play_and_stop_are_idempotent() {
        let (mut media, backend) = recording_controller();

        media.play_video();
        media.play_video();
        media.stop_video();
        media.stop_video();

        assert_eq!(backend.play_count(Track::Video), 1);
        assert_eq!(backend.pause_count(Track::Video), 1);
    }
}
