//! Keepsake: Scene Controllers.
//!
//! Each scene owns a small, monotonic interaction automaton. Controllers
//! never talk to each other or to the sequencer directly: they consume
//! [`domain::signals::SceneInput`] and timer payloads, and emit
//! [`domain::signals::SceneSignal`]s.

pub mod application;
pub mod domain;
