//! Color schemes for the dump view.
//!
//! Each scheme is one row of a lookup table; styles are plain ratatui values so the
//! renderer can apply them without further translation.

use ratatui::style::{Color, Modifier, Style};
use std::fmt;

/// Selectable color scheme, cycled with `c`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScheme {
    #[default]
    Default,
    Light,
    Dark,
}

impl ColorScheme {
    pub const ALL: [ColorScheme; 3] = [ColorScheme::Default, ColorScheme::Light, ColorScheme::Dark];

    pub fn next(self) -> Self {
        match self {
            ColorScheme::Default => ColorScheme::Light,
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Default,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorScheme::Default => "default",
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }

    pub fn theme(self) -> ColorTheme {
        let (fg, bg) = SCHEME_TABLE[self as usize];
        ColorTheme::from_pairs(fg, bg)
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Foreground and background per role, in `Role` order:
/// current line, cursor byte, search hit, info line, decode error.
const SCHEME_TABLE: [([Color; 5], [Color; 5]); 3] = [
    (
        [Color::White, Color::Black, Color::Black, Color::White, Color::White],
        [Color::Blue, Color::White, Color::Magenta, Color::Green, Color::Red],
    ),
    (
        [Color::Black, Color::Black, Color::White, Color::Black, Color::White],
        [Color::Cyan, Color::White, Color::Red, Color::Green, Color::Red],
    ),
    (
        [Color::White, Color::Black, Color::Black, Color::Black, Color::White],
        [Color::Blue, Color::White, Color::Yellow, Color::Green, Color::Red],
    ),
];

/// Resolved styles for one scheme
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTheme {
    /// Row holding the cursor, and the status lines
    pub current_line: Style,
    pub cursor_byte: Style,
    pub search_hit: Style,
    /// Bottom investigate/help line
    pub info_line: Style,
    /// Glyphs that failed to decode
    pub decode_error: Style,
}

impl ColorTheme {
    fn from_pairs(fg: [Color; 5], bg: [Color; 5]) -> Self {
        let style = |i: usize| Style::default().fg(fg[i]).bg(bg[i]);
        Self {
            current_line: style(0),
            cursor_byte: style(1).add_modifier(Modifier::BOLD),
            search_hit: style(2).add_modifier(Modifier::BOLD),
            info_line: style(3),
            decode_error: style(4).add_modifier(Modifier::BOLD),
        }
    }
}

impl Default for ColorTheme {
    fn default() -> Self {
        ColorScheme::Default.theme()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schemes_cycle_through_all() {
        let mut scheme = ColorScheme::default();
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(scheme);
            scheme = scheme.next();
        }
        assert_eq!(seen, ColorScheme::ALL.to_vec());
        assert_eq!(scheme, ColorScheme::Default);
    }

    #[test]
    fn default_theme_colors() {
        let theme = ColorTheme::default();
        assert_eq!(theme.current_line.fg, Some(Color::White));
        assert_eq!(theme.current_line.bg, Some(Color::Blue));
        assert_eq!(theme.search_hit.bg, Some(Color::Magenta));
        assert!(theme.cursor_byte.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn schemes_differ_in_highlight_colors() {
        let light = ColorScheme::Light.theme();
        let dark = ColorScheme::Dark.theme();
        assert_eq!(light.current_line.bg, Some(Color::Cyan));
        assert_eq!(light.search_hit.bg, Some(Color::Red));
        assert_eq!(dark.search_hit.bg, Some(Color::Yellow));
        assert_eq!(light.decode_error, dark.decode_error);
    }
}
