//! Fixed asset locations consumed by the media controller.

use std::path::{Path, PathBuf};

use keepsake_core::media::{PlaybackMode, Track, TrackCue};

/// Default ambient asset, relative to the asset root.
pub const DEFAULT_AMBIENT: &str = "audio/background_song.mp3";
/// Default climax asset. The same file as the ambient, played once.
pub const DEFAULT_CLIMAX: &str = "audio/background_song.mp3";
/// Default reveal video.
pub const DEFAULT_VIDEO: &str = "videos/birthday_video.mp4";

/// Where each media slot's asset lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAssets {
    /// Looping background music.
    pub ambient: PathBuf,
    /// One-shot celebratory song.
    pub climax: PathBuf,
    /// Inline reveal video.
    pub video: PathBuf,
}

impl Default for MediaAssets {
    fn default() -> Self {
        Self {
            ambient: PathBuf::from(DEFAULT_AMBIENT),
            climax: PathBuf::from(DEFAULT_CLIMAX),
            video: PathBuf::from(DEFAULT_VIDEO),
        }
    }
}

impl MediaAssets {
    /// Resolves every relative path against `root`. Absolute paths are kept.
    #[must_use]
    pub fn rooted_at(self, root: &Path) -> Self {
        Self {
            ambient: root.join(self.ambient),
            climax: root.join(self.climax),
            video: root.join(self.video),
        }
    }

    /// Builds the playback cue for `track`.
    #[must_use]
    pub fn cue(&self, track: Track) -> TrackCue {
        let (source, mode) = match track {
            Track::Ambient => (&self.ambient, PlaybackMode::Looping),
            Track::Climax => (&self.climax, PlaybackMode::OneShot),
            Track::Video => (&self.video, PlaybackMode::MutedOneShot),
        };
        TrackCue {
            track,
            source: source.clone(),
            mode,
        }
    }
}
