//! Domain error types.

use thiserror::Error;

use crate::scene::Scene;

/// Top-level domain error type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// An advance was requested to a scene other than the immediate successor.
    #[error("invalid transition from {from} to {to}")]
    InvalidTransition {
        /// The scene that was current when the advance was requested.
        from: Scene,
        /// The scene that was requested.
        to: Scene,
    },

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),
}
