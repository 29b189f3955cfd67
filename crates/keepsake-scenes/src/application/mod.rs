//! Dispatch over the active scene and the rendering boundary.

pub mod controller;
pub mod decor;
pub mod presentation;
