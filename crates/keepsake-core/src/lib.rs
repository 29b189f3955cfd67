//! Keepsake Core: shared abstractions for the narrative sequencer.
//!
//! This crate defines the scene ordering, the timed event scheduler and the
//! ports (clock, media backend, randomness) that every other crate depends
//! on. It contains no platform code.

pub mod aggregate;
pub mod clock;
pub mod error;
pub mod event;
pub mod media;
pub mod rng;
pub mod scene;
pub mod scheduler;
