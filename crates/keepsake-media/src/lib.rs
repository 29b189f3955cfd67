//! Keepsake: Media Controller.
//!
//! Owns the ambient track, the climax track and the reveal video, and
//! turns narrative cues into best-effort backend calls. Playback refusals
//! are logged and swallowed: audio is an enhancement, never a dependency.

pub mod assets;
pub mod controller;

pub use assets::MediaAssets;
pub use controller::{MediaController, MediaState};
