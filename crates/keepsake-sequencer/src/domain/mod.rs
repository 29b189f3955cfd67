//! Sequencer domain model.

pub mod aggregates;
pub mod boundary;
pub mod commands;
pub mod events;
