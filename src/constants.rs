//! Application-wide constants
//!
//! Magic numbers and string literals used throughout the descriptor,
//! providing a single source of truth for constant values.

/// Configuration paths and filenames
pub mod config {
    /// Application directory name under XDG config
    pub const APP_DIR: &str = "tatami";

    /// Configuration filename
    pub const FILENAME: &str = "config.json";

    /// Startup script filename, resolved inside the app config directory
    pub const AUTOSTART: &str = "autostart.sh";

    /// Backup settings
    pub mod backup {
        /// Subdirectory of the config directory holding archives
        pub const SUBDIR: &str = "backups";

        /// Number of automatic backups kept before pruning
        pub const MAX_AUTO: usize = 10;
    }
}

/// Default configuration values
/// Used when building the built-in descriptor or filling missing fields
pub mod defaults {
    /// Commands spawned by bindings
    pub mod commands {
        pub const TERMINAL: &str = "alacritty";
        pub const LAUNCHER: &str = "rofi -show drun";
        pub const BROWSER: &str = "firefox";
        pub const EDITOR: &str = "alacritty -e nvim";
        pub const MIXER: &str = "pavucontrol";
        pub const SCREENSHOT: &str = "flameshot gui";
        pub const LOCKER: &str = "loginctl lock-session";
        pub const FILE_MANAGER: &str = "pcmanfm";
        pub const FILE_RANGER: &str = "alacritty -e ranger";
        pub const FILE_LF: &str = "alacritty -e lf";
        pub const VOLUME_MUTE: &str = "amixer -q set Master toggle";
        pub const VOLUME_DOWN: &str = "amixer -q sset Master 5%- unmute";
        pub const VOLUME_UP: &str = "amixer -q sset Master 5%+ unmute";
    }

    /// Tiled layout appearance
    pub mod layout {
        /// Border thickness around tiled windows in pixels
        pub const BORDER_WIDTH: u16 = 2;

        /// Gap between tiled windows in pixels
        pub const MARGIN: u16 = 4;

        /// Border color of the focused window
        pub const BORDER_FOCUS: &str = "#98971A";

        /// Border color of unfocused windows
        pub const BORDER_NORMAL: &str = "#3C3836";
    }

    /// Status bar appearance
    pub mod bar {
        /// Bar thickness in pixels
        pub const SIZE: u16 = 24;

        /// Bar background color
        pub const BACKGROUND: &str = "#1D2021";

        /// Bar border thickness in pixels
        pub const BORDER_WIDTH: u16 = 0;

        /// Bar border color
        pub const BORDER_COLOR: &str = "#1D2021";

        /// Foreground color for bar text widgets
        pub const FOREGROUND: &str = "#EBDBB2";

        /// Clock widget strftime format
        pub const CLOCK_FORMAT: &str = "%Y-%m-%d %a %H:%M";

        /// Battery widget format, `{percent}` is substituted by the host
        pub const BATTERY_FORMAT: &str = "bat {percent}%";
    }

    /// Floating window appearance
    pub mod floating {
        /// Border thickness around floating windows in pixels
        pub const BORDER_WIDTH: u16 = 1;
    }

    /// Miscellaneous host options
    pub mod options {
        /// Name reported to applications that sniff the window manager
        pub const WMNAME: &str = "LG3D";
    }
}
