//! Screen and status bar declarations
//!
//! A screen carries one bar; the bar carries an ordered widget list. Widget
//! rendering happens entirely in the host using live system state, so each
//! entry here is just the widget's name plus its rendering options.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::constants::defaults;

/// Edge of the screen the bar is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarPosition {
    Top,
    Bottom,
}

/// A status bar widget with its rendering options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum Widget {
    /// Clickable group labels with the current group highlighted
    GroupBox {
        #[serde(default = "default_highlight")]
        highlight: String,
    },
    /// Name of the currently selected layout
    CurrentLayout,
    /// Command prompt for launch-by-name
    Prompt,
    /// Title of the focused window
    WindowName,
    /// Freedesktop system tray
    Systray,
    /// Output volume percentage
    Volume,
    /// Battery charge readout
    Battery {
        #[serde(default = "default_battery_format")]
        format: String,
    },
    /// Wall clock, strftime format
    Clock {
        #[serde(default = "default_clock_format")]
        format: String,
    },
    /// Fixed-width gap between neighbors
    Spacer { length: u16 },
}

fn default_highlight() -> String {
    defaults::layout::BORDER_FOCUS.to_string()
}

fn default_battery_format() -> String {
    defaults::bar::BATTERY_FORMAT.to_string()
}

fn default_clock_format() -> String {
    defaults::bar::CLOCK_FORMAT.to_string()
}

impl Widget {
    /// Stable widget name, matching the serialized `widget` tag
    pub fn name(&self) -> &'static str {
        match self {
            Widget::GroupBox { .. } => "group_box",
            Widget::CurrentLayout => "current_layout",
            Widget::Prompt => "prompt",
            Widget::WindowName => "window_name",
            Widget::Systray => "systray",
            Widget::Volume => "volume",
            Widget::Battery { .. } => "battery",
            Widget::Clock { .. } => "clock",
            Widget::Spacer { .. } => "spacer",
        }
    }

    /// Colors declared by this widget, for validation
    pub fn colors(&self) -> Vec<&str> {
        match self {
            Widget::GroupBox { highlight } => vec![highlight.as_str()],
            _ => Vec::new(),
        }
    }
}

/// Declarative description of a status bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    #[serde(default = "default_position")]
    pub position: BarPosition,
    #[serde(default = "default_size")]
    pub size: u16,
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_foreground")]
    pub foreground: String,
    #[serde(default = "default_border_width")]
    pub border_width: u16,
    #[serde(default = "default_border_color")]
    pub border_color: String,
    #[serde(default)]
    pub widgets: Vec<Widget>,
}

fn default_position() -> BarPosition {
    BarPosition::Top
}

fn default_size() -> u16 {
    defaults::bar::SIZE
}

fn default_background() -> String {
    defaults::bar::BACKGROUND.to_string()
}

fn default_foreground() -> String {
    defaults::bar::FOREGROUND.to_string()
}

fn default_border_width() -> u16 {
    defaults::bar::BORDER_WIDTH
}

fn default_border_color() -> String {
    defaults::bar::BORDER_COLOR.to_string()
}

impl Bar {
    /// All colors declared by the bar and its widgets, for validation
    pub fn colors(&self) -> Vec<&str> {
        let mut colors = vec![
            self.background.as_str(),
            self.foreground.as_str(),
            self.border_color.as_str(),
        ];
        for widget in &self.widgets {
            colors.extend(widget.colors());
        }
        colors
    }
}

/// A physical screen with its bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    pub bar: Bar,
}

/// Render a strftime format against a fixed timestamp
///
/// chrono reports unknown specifiers through `fmt::Error` during rendering,
/// not parsing, so validation has to actually format something.
pub fn render_clock_sample(format: &str) -> Result<String, std::fmt::Error> {
    use chrono::TimeZone;

    let sample = chrono::Utc
        .with_ymd_and_hms(2024, 1, 15, 12, 30, 0)
        .single()
        .ok_or(std::fmt::Error)?;
    let mut out = String::new();
    write!(out, "{}", sample.format(format))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_defaults_fill_missing_fields() {
        let json = r#"{"widgets":[{"widget":"clock"}]}"#;
        let bar: Bar = serde_json::from_str(json).unwrap();
        assert_eq!(bar.position, BarPosition::Top);
        assert_eq!(bar.size, defaults::bar::SIZE);
        assert_eq!(bar.background, defaults::bar::BACKGROUND);
        assert_eq!(bar.widgets.len(), 1);

        let Widget::Clock { format } = &bar.widgets[0] else {
            panic!("expected clock widget");
        };
        assert_eq!(format, defaults::bar::CLOCK_FORMAT);
    }

    #[test]
    fn test_widget_tagged_serialization() {
        let widget = Widget::Spacer { length: 8 };
        let json = serde_json::to_string(&widget).unwrap();
        assert_eq!(json, r#"{"widget":"spacer","length":8}"#);

        let widget = Widget::Systray;
        let json = serde_json::to_string(&widget).unwrap();
        assert_eq!(json, r#"{"widget":"systray"}"#);
    }

    #[test]
    fn test_widget_names_match_tags() {
        let widgets = vec![
            Widget::GroupBox {
                highlight: default_highlight(),
            },
            Widget::CurrentLayout,
            Widget::WindowName,
            Widget::Battery {
                format: default_battery_format(),
            },
        ];
        for widget in widgets {
            let json = serde_json::to_string(&widget).unwrap();
            assert!(json.contains(&format!("\"widget\":\"{}\"", widget.name())));
        }
    }

    #[test]
    fn test_render_clock_sample() {
        let rendered = render_clock_sample("%Y-%m-%d %H:%M").unwrap();
        assert_eq!(rendered, "2024-01-15 12:30");

        // Unknown specifier surfaces as a render error
        assert!(render_clock_sample("%Q").is_err());
    }

    #[test]
    fn test_bar_colors_include_widget_colors() {
        let bar = Bar {
            position: BarPosition::Top,
            size: 24,
            background: "#000000".to_string(),
            foreground: "#FFFFFF".to_string(),
            border_width: 0,
            border_color: "#000000".to_string(),
            widgets: vec![Widget::GroupBox {
                highlight: "#98971A".to_string(),
            }],
        };
        assert_eq!(bar.colors().len(), 4);
    }
}
