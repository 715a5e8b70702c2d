//! Group (virtual desktop) declarations
//!
//! Groups are named workspaces. Each carries declarative match predicates
//! that the host evaluates on window-map events to pick the group a new
//! window lands on. Per-group switch/move key bindings are generated by
//! iterating the group list once rather than written out by hand.

use evdev::KeyCode;
use serde::{Deserialize, Serialize};

use crate::config::action::Action;
use crate::config::binding::{KeyBinding, KeySpec};

/// A predicate matching a window by class, title, or role
///
/// Fields are combined with AND by the host; a predicate with no fields set
/// matches everything and is rejected by validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowMatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl WindowMatch {
    pub fn class(class: &str) -> Self {
        Self {
            class: Some(class.to_string()),
            ..Default::default()
        }
    }

    pub fn title(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    pub fn role(role: &str) -> Self {
        Self {
            role: Some(role.to_string()),
            ..Default::default()
        }
    }

    /// True when at least one match field is set and non-empty
    pub fn is_constrained(&self) -> bool {
        let filled = |f: &Option<String>| f.as_deref().is_some_and(|s| !s.is_empty());
        filled(&self.class) || filled(&self.title) || filled(&self.role)
    }
}

/// A named virtual desktop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Identifier used in bindings and host IPC, conventionally a digit
    pub name: String,

    /// Display label shown in the bar's group box
    #[serde(default)]
    pub label: String,

    /// Layout selected when the group is first shown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_layout: Option<String>,

    /// Windows matching any of these predicates open on this group
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<WindowMatch>,
}

impl Group {
    pub fn new(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            default_layout: None,
            matches: Vec::new(),
        }
    }

    pub fn with_matches(mut self, matches: Vec<WindowMatch>) -> Self {
        self.matches = matches;
        self
    }

    pub fn with_default_layout(mut self, layout: &str) -> Self {
        self.default_layout = Some(layout.to_string());
        self
    }

    /// Key code for the group's number-row key, when the name is a digit
    pub fn digit_key(&self) -> Option<KeyCode> {
        let mut chars = self.name.chars();
        let digit = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        match digit {
            '1' => Some(KeyCode::KEY_1),
            '2' => Some(KeyCode::KEY_2),
            '3' => Some(KeyCode::KEY_3),
            '4' => Some(KeyCode::KEY_4),
            '5' => Some(KeyCode::KEY_5),
            '6' => Some(KeyCode::KEY_6),
            '7' => Some(KeyCode::KEY_7),
            '8' => Some(KeyCode::KEY_8),
            '9' => Some(KeyCode::KEY_9),
            '0' => Some(KeyCode::KEY_0),
            _ => None,
        }
    }
}

/// Generate the per-group key bindings: Super+N switches to group N,
/// Super+Shift+N moves the focused window there and follows it.
///
/// Exactly two bindings per group with a digit name; non-digit names produce
/// none here and are reported by validation instead.
pub fn group_bindings(groups: &[Group]) -> Vec<KeyBinding> {
    let mut bindings = Vec::with_capacity(groups.len() * 2);

    for group in groups {
        let Some(key) = group.digit_key() else {
            continue;
        };

        bindings.push(KeyBinding::new(
            KeySpec::sup(key),
            Action::SwitchGroup {
                name: group.name.clone(),
            },
            &format!("switch to group {}", group.name),
        ));
        bindings.push(KeyBinding::new(
            KeySpec::sup_shift(key),
            Action::MoveToGroup {
                name: group.name.clone(),
            },
            &format!("move window to group {} and follow", group.name),
        ));
    }

    bindings
}
