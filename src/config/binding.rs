//! Key and mouse binding declarations
//!
//! A binding pairs a modifier+key combination with a deferred action the host
//! executes on matching input events. Keys are identified by Linux input
//! event codes and serialize as `KEY_*` name arrays so the JSON form stays
//! hand-editable.

use evdev::KeyCode;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

use crate::config::action::{Action, DragAction};

/// A modifier+key combination
///
/// Equality and hashing cover the full (modifier set, key) pair, which is the
/// identity used for duplicate detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    /// Linux input event code (e.g., KEY_TAB = 15, BTN_LEFT = 272)
    pub key_code: u16,

    /// Control key held
    pub ctrl: bool,

    /// Shift key held
    pub shift: bool,

    /// Alt key held
    pub alt: bool,

    /// Super/Windows key held
    pub super_key: bool,
}

impl KeySpec {
    pub fn new(key_code: u16, ctrl: bool, shift: bool, alt: bool, super_key: bool) -> Self {
        Self {
            key_code,
            ctrl,
            shift,
            alt,
            super_key,
        }
    }

    /// Super + key, the base modifier of the default descriptor
    pub fn sup(key: KeyCode) -> Self {
        Self::new(key.code(), false, false, false, true)
    }

    /// Super + Shift + key
    pub fn sup_shift(key: KeyCode) -> Self {
        Self::new(key.code(), false, true, false, true)
    }

    /// Super + Ctrl + key
    pub fn sup_ctrl(key: KeyCode) -> Self {
        Self::new(key.code(), true, false, false, true)
    }

    /// Bare key, used inside chord scopes
    pub fn bare(key: KeyCode) -> Self {
        Self::new(key.code(), false, false, false, false)
    }

    /// Get human-readable display name (for logs and validation findings)
    pub fn display_name(&self) -> String {
        let mut parts = Vec::new();

        if self.ctrl {
            parts.push("Ctrl".to_string());
        }
        if self.shift {
            parts.push("Shift".to_string());
        }
        if self.alt {
            parts.push("Alt".to_string());
        }
        if self.super_key {
            parts.push("Super".to_string());
        }

        parts.push(key_code_to_name(self.key_code));

        parts.join("+")
    }

    /// Convert to array format for JSON serialization
    /// Format: [modifier_keys..., main_key]
    /// Example: ["KEY_LEFTMETA", "KEY_H"]
    fn to_key_array(&self) -> Vec<String> {
        let mut keys = Vec::new();

        // Modifiers in consistent order
        if self.ctrl {
            keys.push("KEY_LEFTCTRL".to_string());
        }
        if self.shift {
            keys.push("KEY_LEFTSHIFT".to_string());
        }
        if self.alt {
            keys.push("KEY_LEFTALT".to_string());
        }
        if self.super_key {
            keys.push("KEY_LEFTMETA".to_string());
        }

        // Main key using evdev's Debug format
        keys.push(format!("{:?}", KeyCode(self.key_code)));

        keys
    }

    /// Parse from array format
    /// Format: [modifier_keys..., main_key]
    fn from_key_array(keys: &[String]) -> Result<Self, String> {
        if keys.is_empty() {
            return Err("Empty key array".to_string());
        }

        let mut ctrl = false;
        let mut shift = false;
        let mut alt = false;
        let mut super_key = false;
        let mut main_key_code: Option<u16> = None;

        for (i, key_name) in keys.iter().enumerate() {
            match key_name.as_str() {
                "KEY_LEFTCTRL" | "KEY_RIGHTCTRL" => {
                    ctrl = true;
                }
                "KEY_LEFTSHIFT" | "KEY_RIGHTSHIFT" => {
                    shift = true;
                }
                "KEY_LEFTALT" | "KEY_RIGHTALT" => {
                    alt = true;
                }
                "KEY_LEFTMETA" | "KEY_RIGHTMETA" => {
                    super_key = true;
                }
                _ => {
                    // Last entry is the main key, anything else is invalid
                    if i == keys.len() - 1 {
                        main_key_code = event_name_to_key_code(key_name);
                        if main_key_code.is_none() {
                            return Err(format!("Unknown key name: {}", key_name));
                        }
                    } else {
                        return Err(format!(
                            "Non-modifier key '{}' must be last in array",
                            key_name
                        ));
                    }
                }
            }
        }

        match main_key_code {
            Some(code) => Ok(Self::new(code, ctrl, shift, alt, super_key)),
            None => Err("No main key found in array".to_string()),
        }
    }
}

impl Serialize for KeySpec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_key_array().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for KeySpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let keys = Vec::<String>::deserialize(deserializer)?;
        KeySpec::from_key_array(&keys).map_err(de::Error::custom)
    }
}

/// A key binding: modifier+key mapped to a host action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyBinding {
    pub keys: KeySpec,
    pub action: Action,
    #[serde(default)]
    pub desc: String,
}

impl KeyBinding {
    pub fn new(keys: KeySpec, action: Action, desc: &str) -> Self {
        Self {
            keys,
            action,
            desc: desc.to_string(),
        }
    }
}

/// A key chord: a prefix key opening a nested set of bindings
///
/// Chord bindings live in their own scope; the host enters a transient
/// "chord active" state after the prefix and resolves the next key against
/// `bindings` only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyChord {
    pub prefix: KeySpec,
    pub name: String,
    #[serde(default)]
    pub bindings: Vec<KeyBinding>,
}

/// A mouse binding: modifier+button mapped to a drag or click action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MouseBinding {
    pub keys: KeySpec,
    pub action: DragAction,
    /// Optional action run once when the drag starts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Action>,
}

impl MouseBinding {
    pub fn new(keys: KeySpec, action: DragAction) -> Self {
        Self {
            keys,
            action,
            start: None,
        }
    }
}

/// Convert Linux input event code to human-readable name (for logs)
pub fn key_code_to_name(code: u16) -> String {
    let event_name = format!("{:?}", KeyCode(code));

    // Mouse buttons keep their own naming scheme
    match event_name.as_str() {
        "BTN_LEFT" => return "Left Button".to_string(),
        "BTN_RIGHT" => return "Right Button".to_string(),
        "BTN_MIDDLE" => return "Middle Button".to_string(),
        _ => {}
    }

    let name = event_name.strip_prefix("KEY_").unwrap_or(&event_name);

    match name {
        "LEFTCTRL" => "Left Ctrl".to_string(),
        "RIGHTCTRL" => "Right Ctrl".to_string(),
        "LEFTSHIFT" => "Left Shift".to_string(),
        "RIGHTSHIFT" => "Right Shift".to_string(),
        "LEFTALT" => "Left Alt".to_string(),
        "RIGHTALT" => "Right Alt".to_string(),
        "LEFTMETA" => "Left Super".to_string(),
        "RIGHTMETA" => "Right Super".to_string(),

        "ESC" => "Esc".to_string(),
        "BACKSPACE" => "Backspace".to_string(),
        "ENTER" => "Enter".to_string(),
        "SPACE" => "Space".to_string(),
        "TAB" => "Tab".to_string(),
        "DOT" => "Period".to_string(),
        "COMMA" => "Comma".to_string(),

        "PAGEUP" => "Page Up".to_string(),
        "PAGEDOWN" => "Page Down".to_string(),
        "HOME" => "Home".to_string(),
        "END" => "End".to_string(),

        // Single letters/numbers - already clean
        s if s.len() == 1 => s.to_string(),

        // Function keys - already clean (F1, F2, etc.)
        s if s.starts_with('F') && s.len() <= 3 => s.to_string(),

        // Everything else - underscores to spaces and title case
        s => s
            .replace('_', " ")
            .split_whitespace()
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.as_str().to_lowercase().chars())
                        .collect(),
                }
            })
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// Convert Linux input event code name (KEY_*/BTN_*) to its numeric code
fn event_name_to_key_code(name: &str) -> Option<u16> {
    if let Ok(key_code) = KeyCode::from_str(name) {
        return Some(key_code.code());
    }

    None
}
