//! Scene automata.

pub mod cake;
pub mod finale;
pub mod gallery;
pub mod gesture;
pub mod invitation;
pub mod reveal;
pub mod signals;
