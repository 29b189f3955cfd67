//! Keepsake: Narrative Sequencer.
//!
//! Owns the current scene, runs the cross-scene transition protocol and
//! turns scene boundaries into media cues.

pub mod application;
pub mod domain;
