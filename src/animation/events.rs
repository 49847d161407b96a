use std::collections::HashMap;

use crate::foundation::core::Coord;
use crate::foundation::ids::{PathId, SceneId};

/// Completion events a character can react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// The path reached its last waypoint.
    PathComplete(PathId),
    /// The scene finished its last frame. Looping scenes never fire it.
    SceneComplete(SceneId),
}

/// What a character does when a bound event fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Start the path from the current position.
    ActivatePath(PathId),
    /// Restart the scene and show its first frame.
    ActivateScene(SceneId),
    /// Stop following the path if it is the active one.
    DeactivatePath(PathId),
    /// Stop playing the scene if it is the active one.
    DeactivateScene(SceneId),
    /// Jump to a coordinate.
    SetCoordinate(Coord),
    /// Show or hide the character.
    SetVisibility(bool),
    /// Mark the character finished even if a scene is still looping.
    SetComplete,
}

/// Character-scoped event bindings. One action per event; re-registering replaces it.
#[derive(Clone, Debug, Default)]
pub struct EventHandler {
    bindings: HashMap<Event, Action>,
}

impl EventHandler {
    /// Empty binding table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `action` to `event`, returning the binding it replaced.
    pub fn register_event(&mut self, event: Event, action: Action) -> Option<Action> {
        self.bindings.insert(event, action)
    }

    /// Action bound to `event`, if any.
    pub fn action_for(&self, event: Event) -> Option<Action> {
        self.bindings.get(&event).copied()
    }

    /// Number of bound events.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// `true` when nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/events.rs"]
mod tests;
