//! The fixed, totally ordered set of scenes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One stage of the forward-only narrative.
///
/// The derived ordering is the narrative order:
/// `Invitation < Gallery < Reveal < Cake < Finale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scene {
    /// The closed gift box.
    Invitation,
    /// The photo journey.
    Gallery,
    /// The blooming flower and video surprise.
    Reveal,
    /// The interactive cake.
    Cake,
    /// The closing greeting.
    Finale,
}

impl Scene {
    /// Every scene, in narrative order.
    pub const ALL: [Scene; 5] = [
        Scene::Invitation,
        Scene::Gallery,
        Scene::Reveal,
        Scene::Cake,
        Scene::Finale,
    ];

    /// The scene a fresh sequencer starts on.
    pub const FIRST: Scene = Scene::Invitation;

    /// Returns the immediate successor, or `None` for the finale.
    #[must_use]
    pub fn next(self) -> Option<Scene> {
        match self {
            Scene::Invitation => Some(Scene::Gallery),
            Scene::Gallery => Some(Scene::Reveal),
            Scene::Reveal => Some(Scene::Cake),
            Scene::Cake => Some(Scene::Finale),
            Scene::Finale => None,
        }
    }

    /// Position of the scene in the narrative, starting at zero.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Scene::Invitation => 0,
            Scene::Gallery => 1,
            Scene::Reveal => 2,
            Scene::Cake => 3,
            Scene::Finale => 4,
        }
    }

    /// Returns `true` if no scene follows this one.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// Stable lower-case name, used in logs and journal payloads.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Scene::Invitation => "invitation",
            Scene::Gallery => "gallery",
            Scene::Reveal => "reveal",
            Scene::Cake => "cake",
            Scene::Finale => "finale",
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
