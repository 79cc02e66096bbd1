//! Printer options and color palettes.

use serde::{Deserialize, Serialize};

use crate::ansi;
use crate::level::Level;

/// The 16 standard ANSI foreground colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Black,
    DarkRed,
    DarkGreen,
    DarkYellow,
    DarkBlue,
    DarkMagenta,
    DarkCyan,
    LightGray,
    DarkGray,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    /// SGR parameter selecting this color as foreground.
    #[must_use]
    pub const fn fg_code(self) -> &'static str {
        match self {
            Color::Black => ansi::FG_BLACK,
            Color::DarkRed => ansi::FG_DARK_RED,
            Color::DarkGreen => ansi::FG_DARK_GREEN,
            Color::DarkYellow => ansi::FG_DARK_YELLOW,
            Color::DarkBlue => ansi::FG_DARK_BLUE,
            Color::DarkMagenta => ansi::FG_DARK_MAGENTA,
            Color::DarkCyan => ansi::FG_DARK_CYAN,
            Color::LightGray => ansi::FG_LIGHT_GRAY,
            Color::DarkGray => ansi::FG_DARK_GRAY,
            Color::Red => ansi::FG_RED,
            Color::Green => ansi::FG_GREEN,
            Color::Yellow => ansi::FG_YELLOW,
            Color::Blue => ansi::FG_BLUE,
            Color::Magenta => ansi::FG_MAGENTA,
            Color::Cyan => ansi::FG_CYAN,
            Color::White => ansi::FG_WHITE,
        }
    }
}

/// Primary and secondary color for each level.
///
/// The primary color is used for the message and field values, the
/// secondary one for the timestamp, level tag and field names. A level with
/// no colors renders without escape sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette([Option<(Color, Color)>; Level::COUNT]);

impl Palette {
    /// No colors at all.
    pub const NONE: Palette = Palette([None; Level::COUNT]);

    /// The default color scheme.
    pub const COLOR: Palette = Palette([
        Some((Color::DarkGreen, Color::DarkGray)),
        Some((Color::Cyan, Color::DarkCyan)),
        Some((Color::White, Color::LightGray)),
        Some((Color::Yellow, Color::DarkYellow)),
        Some((Color::Red, Color::DarkRed)),
        Some((Color::Magenta, Color::DarkMagenta)),
    ]);

    /// Everything in dark gray.
    pub const DARK: Palette = Palette([Some((Color::DarkGray, Color::DarkGray)); Level::COUNT]);

    /// Builds a palette from one `(primary, secondary)` pair per level.
    #[must_use]
    pub const fn new(colors: [Option<(Color, Color)>; Level::COUNT]) -> Self {
        Self(colors)
    }

    /// Colors for `level`, if any.
    #[must_use]
    pub fn colors(&self, level: Level) -> Option<(Color, Color)> {
        self.0[level.index()]
    }

    /// Whether any level has colors.
    #[must_use]
    pub fn is_colored(&self) -> bool {
        self.0.iter().any(Option::is_some)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::NONE
    }
}

/// A rendering tweak, applied in order so a later option of the same kind
/// overrides an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrinterOption {
    /// Colors per level.
    Palette(Palette),
    /// Whether to print a timestamp.
    ShowTime(bool),
    /// Whether to print the level tag.
    ShowLevel(bool),
    /// Minimum column at which the right-hand side starts.
    FieldIndent(usize),
    /// Message on the left, fields on the right.
    MessageFirst,
    /// Fields on the left, message on the right.
    FieldsFirst,
    /// Crop transient lines to this many visible characters (0 = never).
    TransientLineLength(usize),
}
