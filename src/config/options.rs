//! Global scalar options
//!
//! Flattened into the top level of the serialized descriptor so the host can
//! read each option by its conventional name.

use serde::{Deserialize, Serialize};

use crate::constants::defaults;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Focus follows the pointer between windows; off by default so focus
    /// only moves on click or keyboard navigation
    pub follow_mouse_focus: bool,

    /// Honor fullscreen requests from clients
    pub auto_fullscreen: bool,

    /// Clicking a window raises it
    pub bring_front_click: bool,

    /// Warp the pointer to the focused window on keyboard focus changes
    pub cursor_warp: bool,

    /// Minimize windows that request it
    pub auto_minimize: bool,

    /// Re-evaluate screen configuration when outputs change
    pub reconfigure_screens: bool,

    /// Window manager name reported to applications; some Java toolkits
    /// refuse to draw unless this looks like a known reparenting WM
    pub wmname: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            follow_mouse_focus: false,
            auto_fullscreen: true,
            bring_front_click: false,
            cursor_warp: false,
            auto_minimize: true,
            reconfigure_screens: true,
            wmname: defaults::options::WMNAME.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert!(!options.follow_mouse_focus);
        assert!(!options.bring_front_click);
        assert!(options.auto_fullscreen);
        assert_eq!(options.wmname, "LG3D");
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let json = r#"{"follow_mouse_focus":true}"#;
        let options: Options = serde_json::from_str(json).unwrap();
        assert!(options.follow_mouse_focus);
        assert!(options.auto_fullscreen);
        assert_eq!(options.wmname, defaults::options::WMNAME);
    }
}
