//! The photo journey.
//!
//! The gallery has no automaton beyond "viewing". A lightbox can enlarge one
//! photo at a time; it is purely local and never reaches the sequencer.

use serde::Serialize;
use tracing::debug;

use super::signals::{SceneInput, SceneSignal};

/// One photo in the journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Photo {
    /// Stable identifier used by the lightbox.
    pub id: u8,
    /// Image location, relative to the asset root.
    pub source: &'static str,
    /// Caption shown under the print.
    pub caption: &'static str,
}

/// The canonical photo set, in timeline order.
pub const PHOTOS: [Photo; 4] = [
    Photo {
        id: 1,
        source: "images/Photo1.svg",
        caption: "As always with you",
    },
    Photo {
        id: 2,
        source: "images/Photo2.svg",
        caption: "Celebrating life's beautiful moments",
    },
    Photo {
        id: 3,
        source: "images/Photo3.svg",
        caption: "Making memories that last forever",
    },
    Photo {
        id: 4,
        source: "images/Photo4.svg",
        caption: "Adventures and fun times",
    },
];

/// Looks up a photo by id.
#[must_use]
pub fn photo(id: u8) -> Option<&'static Photo> {
    PHOTOS.iter().find(|p| p.id == id)
}

/// Controller for the gallery scene.
#[derive(Debug, Default)]
pub struct Gallery {
    lightbox: Option<u8>,
    advanced: bool,
}

impl Gallery {
    /// Creates a gallery with no photo enlarged.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The enlarged photo, if any.
    #[must_use]
    pub fn lightbox(&self) -> Option<&'static Photo> {
        self.lightbox.and_then(photo)
    }

    /// Handles lightbox navigation and the continue control.
    pub fn handle_input(&mut self, input: &SceneInput) -> Vec<SceneSignal> {
        match input {
            SceneInput::OpenPhoto { id } if photo(*id).is_some() => {
                self.lightbox = Some(*id);
                Vec::new()
            }
            SceneInput::ClosePhoto => {
                self.lightbox = None;
                Vec::new()
            }
            SceneInput::Continue if !self.advanced => {
                self.advanced = true;
                vec![SceneSignal::Advance]
            }
            _ => {
                debug!(?input, "gallery ignored input");
                Vec::new()
            }
        }
    }
}
