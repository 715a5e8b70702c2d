//! Layout selections
//!
//! The host cycles through this list at runtime; each entry names a layout
//! algorithm plus its options. The algorithms themselves live in the host.

use serde::{Deserialize, Serialize};

use crate::constants::defaults;

/// A window-arrangement algorithm selection with its options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Layout {
    /// Resizable column tiling
    Columns {
        #[serde(default = "default_border_width")]
        border_width: u16,
        #[serde(default = "default_border_focus")]
        border_focus: String,
        #[serde(default = "default_border_normal")]
        border_normal: String,
        #[serde(default = "default_margin")]
        margin: u16,
    },
    /// Single maximized window, no borders
    Max,
    /// Fixed number of stacked columns
    Stack {
        #[serde(default = "default_num_stacks")]
        num_stacks: u8,
        #[serde(default = "default_border_width")]
        border_width: u16,
    },
}

fn default_border_width() -> u16 {
    defaults::layout::BORDER_WIDTH
}

fn default_border_focus() -> String {
    defaults::layout::BORDER_FOCUS.to_string()
}

fn default_border_normal() -> String {
    defaults::layout::BORDER_NORMAL.to_string()
}

fn default_margin() -> u16 {
    defaults::layout::MARGIN
}

fn default_num_stacks() -> u8 {
    2
}

impl Layout {
    /// Stable algorithm name, matching the serialized `kind` tag
    ///
    /// `Group::default_layout` references layouts by this name.
    pub fn name(&self) -> &'static str {
        match self {
            Layout::Columns { .. } => "columns",
            Layout::Max => "max",
            Layout::Stack { .. } => "stack",
        }
    }

    /// Border colors declared by this layout, for validation
    pub fn colors(&self) -> Vec<&str> {
        match self {
            Layout::Columns {
                border_focus,
                border_normal,
                ..
            } => vec![border_focus.as_str(), border_normal.as_str()],
            Layout::Max => Vec::new(),
            Layout::Stack { .. } => Vec::new(),
        }
    }

    pub fn columns() -> Self {
        Layout::Columns {
            border_width: default_border_width(),
            border_focus: default_border_focus(),
            border_normal: default_border_normal(),
            margin: default_margin(),
        }
    }

    pub fn stack() -> Self {
        Layout::Stack {
            num_stacks: default_num_stacks(),
            border_width: default_border_width(),
        }
    }
}
