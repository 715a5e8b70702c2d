//! The top-level configuration descriptor
//!
//! One static bundle of settings the host reads at startup and on manual
//! reload: key bindings, chords, mouse bindings, groups, layouts, screens,
//! floating rules, and global options. The built-in declaration lives in the
//! `Default` impl; a JSON file under the XDG config directory overrides it
//! field-by-field.

use anyhow::{Context, Result};
use evdev::KeyCode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::action::{Action, Direction, DragAction};
use crate::config::bar::{Bar, BarPosition, Screen, Widget};
use crate::config::binding::{KeyBinding, KeyChord, KeySpec, MouseBinding};
use crate::config::group::{Group, WindowMatch, group_bindings};
use crate::config::layout::Layout;
use crate::config::options::Options;
use crate::constants::defaults;

/// Floating layout options and the rules exempting windows from tiling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatingConfig {
    pub border_width: u16,
    pub border_focus: String,
    pub border_normal: String,
    /// Windows matching any rule float instead of tiling
    pub rules: Vec<WindowMatch>,
}

impl Default for FloatingConfig {
    fn default() -> Self {
        Self {
            border_width: defaults::floating::BORDER_WIDTH,
            border_focus: defaults::layout::BORDER_FOCUS.to_string(),
            border_normal: defaults::layout::BORDER_NORMAL.to_string(),
            rules: default_floating_rules(),
        }
    }
}

/// The complete configuration descriptor
///
/// Serialized field names are the fixed top-level names the host looks up:
/// `keys`, `chords`, `mouse`, `groups`, `layouts`, `screens`,
/// `floating_layout`, and the flattened option names including `wmname`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_keys")]
    pub keys: Vec<KeyBinding>,
    #[serde(default = "default_chords")]
    pub chords: Vec<KeyChord>,
    #[serde(default = "default_mouse")]
    pub mouse: Vec<MouseBinding>,
    #[serde(default = "default_groups")]
    pub groups: Vec<Group>,
    #[serde(default = "default_layouts")]
    pub layouts: Vec<Layout>,
    #[serde(default = "default_screens")]
    pub screens: Vec<Screen>,
    #[serde(rename = "floating_layout", default)]
    pub floating: FloatingConfig,
    #[serde(flatten)]
    pub options: Options,
}

fn default_keys() -> Vec<KeyBinding> {
    use Direction::{Down, Left, Right, Up};

    let focus = |key, dir, desc: &str| {
        KeyBinding::new(KeySpec::sup(key), Action::Focus { dir }, desc)
    };
    let shuffle = |key, dir, desc: &str| {
        KeyBinding::new(KeySpec::sup_shift(key), Action::Shuffle { dir }, desc)
    };
    let grow = |key, dir, desc: &str| {
        KeyBinding::new(KeySpec::sup_ctrl(key), Action::Grow { dir }, desc)
    };

    vec![
        focus(KeyCode::KEY_H, Left, "focus left"),
        focus(KeyCode::KEY_J, Down, "focus down"),
        focus(KeyCode::KEY_K, Up, "focus up"),
        focus(KeyCode::KEY_L, Right, "focus right"),
        shuffle(KeyCode::KEY_H, Left, "move window left"),
        shuffle(KeyCode::KEY_J, Down, "move window down"),
        shuffle(KeyCode::KEY_K, Up, "move window up"),
        shuffle(KeyCode::KEY_L, Right, "move window right"),
        grow(KeyCode::KEY_H, Left, "grow window left"),
        grow(KeyCode::KEY_J, Down, "grow window down"),
        grow(KeyCode::KEY_K, Up, "grow window up"),
        grow(KeyCode::KEY_L, Right, "grow window right"),
        KeyBinding::new(
            KeySpec::sup(KeyCode::KEY_N),
            Action::Normalize,
            "reset window sizes",
        ),
        KeyBinding::new(
            KeySpec::sup(KeyCode::KEY_ENTER),
            Action::Spawn {
                command: defaults::commands::TERMINAL.to_string(),
            },
            "launch terminal",
        ),
        KeyBinding::new(
            KeySpec::sup_shift(KeyCode::KEY_ENTER),
            Action::ToggleSplit,
            "toggle split/stacked panes",
        ),
        KeyBinding::new(
            KeySpec::sup(KeyCode::KEY_D),
            Action::Spawn {
                command: defaults::commands::LAUNCHER.to_string(),
            },
            "application launcher",
        ),
        KeyBinding::new(
            KeySpec::sup(KeyCode::KEY_TAB),
            Action::NextLayout,
            "next layout",
        ),
        KeyBinding::new(
            KeySpec::sup_shift(KeyCode::KEY_TAB),
            Action::PrevLayout,
            "previous layout",
        ),
        KeyBinding::new(
            KeySpec::sup(KeyCode::KEY_W),
            Action::KillWindow,
            "close focused window",
        ),
        KeyBinding::new(
            KeySpec::sup(KeyCode::KEY_F),
            Action::ToggleFullscreen,
            "toggle fullscreen",
        ),
        KeyBinding::new(
            KeySpec::sup(KeyCode::KEY_T),
            Action::ToggleFloating,
            "toggle floating",
        ),
        KeyBinding::new(
            KeySpec::sup_shift(KeyCode::KEY_R),
            Action::ReloadConfig,
            "reload configuration",
        ),
        KeyBinding::new(
            KeySpec::sup_shift(KeyCode::KEY_Q),
            Action::Shutdown,
            "exit window manager",
        ),
        // Media keys bind without modifiers
        KeyBinding::new(
            KeySpec::bare(KeyCode::KEY_MUTE),
            Action::Spawn {
                command: defaults::commands::VOLUME_MUTE.to_string(),
            },
            "toggle mute",
        ),
        KeyBinding::new(
            KeySpec::bare(KeyCode::KEY_VOLUMEDOWN),
            Action::Spawn {
                command: defaults::commands::VOLUME_DOWN.to_string(),
            },
            "lower volume",
        ),
        KeyBinding::new(
            KeySpec::bare(KeyCode::KEY_VOLUMEUP),
            Action::Spawn {
                command: defaults::commands::VOLUME_UP.to_string(),
            },
            "raise volume",
        ),
    ]
}

fn default_chords() -> Vec<KeyChord> {
    let spawn = |key, command: &str, desc: &str| {
        KeyBinding::new(
            KeySpec::bare(key),
            Action::Spawn {
                command: command.to_string(),
            },
            desc,
        )
    };

    vec![
        KeyChord {
            prefix: KeySpec::sup(KeyCode::KEY_P),
            name: "launch".to_string(),
            bindings: vec![
                spawn(KeyCode::KEY_B, defaults::commands::BROWSER, "browser"),
                spawn(KeyCode::KEY_E, defaults::commands::EDITOR, "editor"),
                spawn(KeyCode::KEY_M, defaults::commands::MIXER, "volume mixer"),
                spawn(KeyCode::KEY_S, defaults::commands::SCREENSHOT, "screenshot"),
                spawn(KeyCode::KEY_L, defaults::commands::LOCKER, "lock session"),
            ],
        },
        KeyChord {
            prefix: KeySpec::sup(KeyCode::KEY_E),
            name: "files".to_string(),
            bindings: vec![
                spawn(KeyCode::KEY_P, defaults::commands::FILE_MANAGER, "pcmanfm"),
                spawn(KeyCode::KEY_R, defaults::commands::FILE_RANGER, "ranger"),
                spawn(KeyCode::KEY_L, defaults::commands::FILE_LF, "lf"),
            ],
        },
    ]
}

fn default_mouse() -> Vec<MouseBinding> {
    vec![
        MouseBinding::new(KeySpec::sup(KeyCode::BTN_LEFT), DragAction::MoveWindow),
        MouseBinding::new(KeySpec::sup(KeyCode::BTN_RIGHT), DragAction::ResizeWindow),
        MouseBinding::new(KeySpec::sup(KeyCode::BTN_MIDDLE), DragAction::BringToFront),
    ]
}

fn default_groups() -> Vec<Group> {
    vec![
        Group::new("1", "term"),
        Group::new("2", "www")
            .with_matches(vec![WindowMatch::class("firefox")])
            .with_default_layout("max"),
        Group::new("3", "dev").with_matches(vec![WindowMatch::class("code")]),
        Group::new("4", "chat").with_matches(vec![
            WindowMatch::class("Slack"),
            WindowMatch::class("discord"),
        ]),
        Group::new("5", "media")
            .with_matches(vec![WindowMatch::class("mpv")])
            .with_default_layout("max"),
        Group::new("6", "6"),
        Group::new("7", "7"),
        Group::new("8", "8"),
        Group::new("9", "9"),
    ]
}

fn default_layouts() -> Vec<Layout> {
    vec![Layout::columns(), Layout::Max, Layout::stack()]
}

fn default_screens() -> Vec<Screen> {
    vec![Screen {
        bar: Bar {
            position: BarPosition::Top,
            size: defaults::bar::SIZE,
            background: defaults::bar::BACKGROUND.to_string(),
            foreground: defaults::bar::FOREGROUND.to_string(),
            border_width: defaults::bar::BORDER_WIDTH,
            border_color: defaults::bar::BORDER_COLOR.to_string(),
            widgets: vec![
                Widget::GroupBox {
                    highlight: defaults::layout::BORDER_FOCUS.to_string(),
                },
                Widget::CurrentLayout,
                Widget::Prompt,
                Widget::WindowName,
                Widget::Systray,
                Widget::Volume,
                Widget::Battery {
                    format: defaults::bar::BATTERY_FORMAT.to_string(),
                },
                Widget::Clock {
                    format: defaults::bar::CLOCK_FORMAT.to_string(),
                },
            ],
        },
    }]
}

fn default_floating_rules() -> Vec<WindowMatch> {
    vec![
        WindowMatch::role("AlarmWindow"),   // Thunderbird calendar
        WindowMatch::role("ConfigManager"), // Thunderbird about:config
        WindowMatch::role("pop-up"),
        WindowMatch::title("branchdialog"), // gitk
        WindowMatch::title("Event Tester"), // xev
        WindowMatch::title("pinentry"),     // GPG passphrase entry
        WindowMatch::class("Arandr"),
        WindowMatch::class("Blueman-manager"),
        WindowMatch::class("confirmreset"), // gitk
        WindowMatch::class("copyq"),
        WindowMatch::class("DTA"),
        WindowMatch::class("Gpick"),
        WindowMatch::class("Kruler"),
        WindowMatch::class("makebranch"), // gitk
        WindowMatch::class("maketag"),    // gitk
        WindowMatch::class("MessageWin"), // kalarm
        WindowMatch::class("pinentry"),
        WindowMatch::class("pinentry-gtk-2"),
        WindowMatch::class("ssh-askpass"),
        WindowMatch::class("Sxiv"),
        WindowMatch::class("Tor Browser"), // fixed window size
        WindowMatch::class("veromix"),
        WindowMatch::class("Wpa_gui"),
        WindowMatch::class("xtightvncviewer"),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keys: default_keys(),
            chords: default_chords(),
            mouse: default_mouse(),
            groups: default_groups(),
            layouts: default_layouts(),
            screens: default_screens(),
            floating: FloatingConfig::default(),
            options: Options::default(),
        }
    }
}

impl Config {
    pub fn path() -> PathBuf {
        #[cfg(not(test))]
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        #[cfg(test)]
        let mut path = std::env::temp_dir().join("tatami-config-test");

        path.push(crate::constants::config::APP_DIR);
        path.push(crate::constants::config::FILENAME);
        path
    }

    /// Path of the startup script, next to the config file
    pub fn autostart_path() -> PathBuf {
        let mut path = Self::path();
        path.pop();
        path.push(crate::constants::config::AUTOSTART);
        path
    }

    /// Load the descriptor from the JSON file, or write out the built-in
    /// declaration when no file exists yet
    pub fn load() -> Result<Self> {
        let config_path = Self::path();

        if !config_path.exists() {
            info!(path = %config_path.display(), "Config file not found, writing built-in defaults");
            let config = Config::default();
            config.save()?;
            return Ok(config);
        }

        Self::load_from(&config_path)
    }

    /// Load the descriptor from an explicit path; missing file is an error
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        let config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse JSON from {:?}", path))?;

        info!(
            keys = config.keys.len(),
            groups = config.groups.len(),
            "Loaded config"
        );
        Ok(config)
    }

    /// Re-read the descriptor from disk, replacing the in-memory state
    ///
    /// Startup hook state is process-global and unaffected by reloads.
    pub fn reload(&mut self) -> Result<()> {
        *self = Self::load()?;
        info!("Config reloaded");
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let json_string =
            serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;

        fs::write(path, json_string)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        info!(path = %path.display(), "Saved config");
        Ok(())
    }

    /// Declared key bindings plus the generated per-group bindings, the set
    /// the host actually grabs
    pub fn effective_keys(&self) -> Vec<KeyBinding> {
        let mut keys = self.keys.clone();
        keys.extend(group_bindings(&self.groups));
        keys
    }

    /// The descriptor as handed to the host: generated group bindings are
    /// expanded into `keys`
    pub fn host_payload(&self) -> Config {
        let mut payload = self.clone();
        payload.keys = self.effective_keys();
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_descriptor_shape() {
        let config = Config::default();

        assert_eq!(config.groups.len(), 9);
        assert_eq!(config.layouts.len(), 3);
        assert_eq!(config.screens.len(), 1);
        assert_eq!(config.mouse.len(), 3);
        assert_eq!(config.chords.len(), 2);
        assert!(!config.keys.is_empty());
        assert_eq!(config.floating.rules.len(), 24);
    }

    #[test]
    fn test_default_media_keys_bind_without_modifiers() {
        let config = Config::default();

        let bare: Vec<&KeyBinding> = config
            .keys
            .iter()
            .filter(|b| {
                let k = b.keys;
                !k.ctrl && !k.shift && !k.alt && !k.super_key
            })
            .collect();

        assert_eq!(bare.len(), 3);
        for binding in bare {
            assert!(matches!(binding.action, Action::Spawn { .. }));
        }
    }

    #[test]
    fn test_default_chords_cover_launch_and_files() {
        let config = Config::default();
        let names: Vec<&str> = config.chords.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["launch", "files"]);

        // Chord prefixes must not collide with declared top-level keys
        for chord in &config.chords {
            assert!(config.keys.iter().all(|b| b.keys != chord.prefix));
        }
    }

    #[test]
    fn test_effective_keys_add_two_per_group() {
        let config = Config::default();
        let effective = config.effective_keys();
        assert_eq!(
            effective.len(),
            config.keys.len() + config.groups.len() * 2
        );
    }

    #[test]
    fn test_host_payload_expands_group_bindings() {
        let config = Config::default();
        let payload = config.host_payload();
        assert_eq!(payload.keys.len(), config.effective_keys().len());
        // Everything else is untouched
        assert_eq!(payload.groups, config.groups);
        assert_eq!(payload.layouts, config.layouts);
    }

    #[test]
    fn test_top_level_serialized_names() {
        let config = Config::default();
        let json = serde_json::to_value(&config).unwrap();
        let object = json.as_object().unwrap();

        for name in [
            "keys",
            "chords",
            "mouse",
            "groups",
            "layouts",
            "screens",
            "floating_layout",
            "follow_mouse_focus",
            "wmname",
        ] {
            assert!(object.contains_key(name), "missing top-level name {name}");
        }
    }

    #[test]
    fn test_serialization_roundtrip() {
        let config = Config::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let deserialized: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_empty_object_yields_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_override_keeps_other_sections() {
        let json = r#"{"wmname":"tatami","groups":[{"name":"1","label":"only"}]}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.options.wmname, "tatami");
        assert_eq!(config.groups.len(), 1);
        // Untouched sections fall back to the built-in declaration
        assert_eq!(config.layouts, Config::default().layouts);
        assert_eq!(config.keys, Config::default().keys);
    }

    #[test]
    fn test_save_and_load_from() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let config = Config::default();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let result = Config::load_from(&dir.path().join("nope.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_malformed_json_fails_with_path_context() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("config.json"));
    }

    #[test]
    fn test_autostart_path_is_sibling_of_config() {
        let autostart = Config::autostart_path();
        assert_eq!(
            autostart.file_name().unwrap(),
            crate::constants::config::AUTOSTART
        );
        assert_eq!(autostart.parent(), Config::path().parent());
    }
}
