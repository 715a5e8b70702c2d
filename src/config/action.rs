//! Deferred actions referenced by bindings
//!
//! An action is a name for something the host does when a binding fires; the
//! descriptor only declares it. Serialized with a `do` tag so the JSON form
//! reads as `{"do": "switch_group", "name": "3"}`.

use serde::{Deserialize, Serialize};

/// Direction argument for focus/move/resize actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// An action the host executes on a key press
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "do", rename_all = "snake_case")]
pub enum Action {
    /// Run an external command, fire-and-forget
    Spawn { command: String },

    /// Move focus within the current layout
    Focus { dir: Direction },

    /// Swap the focused window with its neighbor
    Shuffle { dir: Direction },

    /// Grow the focused window in the current layout
    Grow { dir: Direction },

    /// Reset all window sizes to the layout defaults
    Normalize,

    /// Close the focused window
    KillWindow,

    /// Toggle fullscreen on the focused window
    ToggleFullscreen,

    /// Toggle floating on the focused window
    ToggleFloating,

    /// Toggle between split and stacked panes in the current layout
    ToggleSplit,

    /// Cycle to the next configured layout
    NextLayout,

    /// Cycle to the previous configured layout
    PrevLayout,

    /// Switch the current screen to the named group
    SwitchGroup { name: String },

    /// Move the focused window to the named group and follow it
    MoveToGroup { name: String },

    /// Re-read this descriptor from disk
    ReloadConfig,

    /// Shut the host down
    Shutdown,
}

/// A drag or click action bound to a mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragAction {
    /// Drag the window to a new floating position
    MoveWindow,
    /// Drag to resize the floating window
    ResizeWindow,
    /// Click to raise the window above its siblings
    BringToFront,
}

impl Action {
    /// Group name referenced by this action, if any
    ///
    /// Used by validation to check that bindings only name declared groups.
    pub fn group_ref(&self) -> Option<&str> {
        match self {
            Action::SwitchGroup { name } | Action::MoveToGroup { name } => Some(name),
            _ => None,
        }
    }
}
