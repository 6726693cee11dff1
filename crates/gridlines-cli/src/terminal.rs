//! Terminal styling and color utilities.
//!
//! This module provides the ANSI colours used to tell drawn lines apart on
//! the ASCII canvas, plus detection of whether colour and Unicode glyphs
//! should be used at all.

/// ANSI escape codes for text styling and colors.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";
    /// Gray for the corridor margin around lines.
    pub const GRAY: &str = "\x1b[90m";
    /// Bold reverse green for line endpoints.
    pub const ENDPOINT: &str = "\x1b[1;7;32m";
    /// Red for failure messages.
    pub const RED: &str = "\x1b[31m";

    /// Colours cycled through for consecutive lines.
    pub const LINE_COLORS: [&str; 6] = [
        "\x1b[36m",
        "\x1b[33m",
        "\x1b[35m",
        "\x1b[34m",
        "\x1b[32m",
        "\x1b[38;5;208m",
    ];
}

/// A collection of resolved color codes, either actual ANSI sequences
/// or empty strings when color is disabled.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub gray: &'static str,
    pub endpoint: &'static str,
    pub red: &'static str,
    lines: Option<&'static [&'static str]>,
}

impl ColorPalette {
    /// Create a palette with actual ANSI color codes.
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            gray: colors::GRAY,
            endpoint: colors::ENDPOINT,
            red: colors::RED,
            lines: Some(&colors::LINE_COLORS),
        }
    }

    /// Create a palette with no colors (empty strings).
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            gray: "",
            endpoint: "",
            red: "",
            lines: None,
        }
    }

    /// Create a palette based on terminal capabilities.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    /// Colour for the `index`-th drawn line.
    #[must_use]
    pub fn line(&self, index: usize) -> &'static str {
        match self.lines {
            Some(lines) => lines[index % lines.len()],
            None => "",
        }
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

/// Check if the terminal supports Unicode characters.
///
/// Looks for a UTF locale in `LANG` or `LC_ALL`.
#[must_use]
pub fn supports_unicode() -> bool {
    ["LANG", "LC_ALL"].iter().any(|key| {
        std::env::var(key)
            .map(|value| value.to_uppercase().contains("UTF"))
            .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_palette_has_no_escapes() {
        let palette = ColorPalette::plain();
        assert!(palette.reset.is_empty());
        assert!(palette.line(3).is_empty());
    }

    #[test]
    fn line_colours_cycle() {
        let palette = ColorPalette::colored();
        assert_eq!(palette.line(0), palette.line(colors::LINE_COLORS.len()));
        assert_ne!(palette.line(0), palette.line(1));
    }
}
