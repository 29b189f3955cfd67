//! Test media backends: fake `MediaBackend` implementations for tests.

use std::sync::{Arc, Mutex};

use keepsake_core::media::{MediaBackend, PlaybackError, Track, TrackCue};

/// One call observed by a fake backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaCall {
    /// `play` was called with this cue.
    Play(TrackCue),
    /// `pause` was called for this track.
    Pause(Track),
}

/// A media backend that records every call and accepts every play.
///
/// Clones share the same call log, so a test can keep one clone while the
/// controller owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingMediaBackend {
    calls: Arc<Mutex<Vec<MediaCall>>>,
}

impl RecordingMediaBackend {
    /// Creates a backend with an empty call log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all calls so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn calls(&self) -> Vec<MediaCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Counts `play` calls for `track`.
    pub fn play_count(&self, track: Track) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, MediaCall::Play(cue) if cue.track == track))
            .count()
    }

    /// Counts `pause` calls for `track`.
    pub fn pause_count(&self, track: Track) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, MediaCall::Pause(t) if *t == track))
            .count()
    }
}

impl MediaBackend for RecordingMediaBackend {
    fn play(&mut self, cue: &TrackCue) -> Result<(), PlaybackError> {
        self.calls.lock().unwrap().push(MediaCall::Play(cue.clone()));
        Ok(())
    }

    fn pause(&mut self, track: Track) {
        self.calls.lock().unwrap().push(MediaCall::Pause(track));
    }
}

/// A media backend that records calls but refuses every play, as a browser
/// enforcing an autoplay policy would.
#[derive(Debug, Clone, Default)]
pub struct RejectingMediaBackend {
    inner: RecordingMediaBackend,
}

impl RejectingMediaBackend {
    /// Creates a backend with an empty call log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all calls so far.
    pub fn calls(&self) -> Vec<MediaCall> {
        self.inner.calls()
    }
}

impl MediaBackend for RejectingMediaBackend {
    fn play(&mut self, cue: &TrackCue) -> Result<(), PlaybackError> {
        self.inner.play(cue)?;
        Err(PlaybackError::Rejected("autoplay blocked".into()))
    }

    fn pause(&mut self, track: Track) {
        self.inner.pause(track);
    }
}
