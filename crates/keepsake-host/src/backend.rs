//! Media backend for the terminal host.
//!
//! There is no audio device here: playback is announced in the log. An
//! asset that does not exist on disk is refused, the same way a browser
//! refuses a broken source.

use std::collections::HashSet;

use keepsake_core::media::{MediaBackend, PlaybackError, Track, TrackCue};
use tracing::info;

/// Checks assets on disk and logs playback.
#[derive(Debug, Default)]
pub struct FileMediaBackend {
    playing: HashSet<Track>,
}

impl FileMediaBackend {
    /// Creates a backend with nothing playing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl MediaBackend for FileMediaBackend {
    fn play(&mut self, cue: &TrackCue) -> Result<(), PlaybackError> {
        if !cue.source.is_file() {
            return Err(PlaybackError::AssetUnavailable(cue.source.clone()));
        }
        self.playing.insert(cue.track);
        info!(track = ?cue.track, mode = ?cue.mode, source = %cue.source.display(), "now playing");
        Ok(())
    }

    fn pause(&mut self, track: Track) {
        if self.playing.remove(&track) {
            info!(?track, "paused");
        }
    }
}
