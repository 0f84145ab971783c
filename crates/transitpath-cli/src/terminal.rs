//! Terminal styling and color utilities.
//!
//! This module provides ANSI escape code definitions and color detection
//! for terminal output formatting. Station highlighting follows the
//! [`StationMark`] a selection assigns to each station.

use transitpath_lib::StationMark;

/// ANSI escape codes for text styling and colors.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";

    /// Bright bold white for headings and station names.
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for idle stations and secondary text.
    pub const GRAY: &str = "\x1b[90m";
    /// Bold yellow for selected endpoints.
    pub const YELLOW_BOLD: &str = "\x1b[1;33m";
    /// Yellow for stations along the computed path.
    pub const YELLOW: &str = "\x1b[33m";
    /// Red for avoided stations.
    pub const RED: &str = "\x1b[31m";
}

/// A collection of resolved color codes, either actual ANSI sequences
/// or empty strings when color is disabled.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub heading: &'static str,
    pub idle: &'static str,
    pub selected: &'static str,
    pub on_path: &'static str,
    pub forbidden: &'static str,
}

impl ColorPalette {
    /// Create a palette with actual ANSI color codes.
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            heading: colors::WHITE_BOLD,
            idle: colors::GRAY,
            selected: colors::YELLOW_BOLD,
            on_path: colors::YELLOW,
            forbidden: colors::RED,
        }
    }

    /// Create a palette with no colors (empty strings).
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            heading: "",
            idle: "",
            selected: "",
            on_path: "",
            forbidden: "",
        }
    }

    /// Create a palette based on terminal capabilities.
    ///
    /// Returns `colored()` if the terminal supports ANSI colors,
    /// otherwise returns `plain()`.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    /// Pick the palette for the `--no-color` flag.
    #[must_use]
    pub fn for_flag(no_color: bool) -> Self {
        if no_color {
            Self::plain()
        } else {
            Self::detect()
        }
    }

    /// Escape sequence used to paint a station with the given mark.
    #[must_use]
    pub const fn mark(&self, mark: StationMark) -> &'static str {
        match mark {
            StationMark::Idle => self.idle,
            StationMark::Selected => self.selected,
            StationMark::Forbidden => self.forbidden,
            StationMark::OnPath => self.on_path,
        }
    }

    /// Wrap `name` in the color for `mark`.
    pub fn paint(&self, mark: StationMark, name: &str) -> String {
        format!("{}{}{}", self.mark(mark), name, self.reset)
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Check if the terminal supports ANSI color codes.
///
/// This function respects:
/// - The `NO_COLOR` environment variable (https://no-color.org/)
/// - The `TERM=dumb` convention for non-capable terminals
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}
