//! Keepsake host: runs the narrative in a terminal.
//!
//! Reads one command per line from an async reader, drives the sequencer's
//! timers in real time and writes a text projection of each scene.

pub mod app;
pub mod backend;
pub mod config;
pub mod console;
pub mod error;
pub mod render;
