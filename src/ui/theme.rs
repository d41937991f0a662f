//! Color theme and styling definitions using ratatui colors.
//!
//! This module provides color themes for terminal rendering using ratatui's
//! color system directly to avoid unnecessary abstractions.

use ratatui::style::{Color, Modifier, Style};

/// Color theme for terminal UI elements.
#[derive(Debug, Clone)]
pub struct ColorTheme {
    /// Normal cell text color (None uses terminal default)
    pub normal_text: Option<Color>,

    /// Column title row
    pub header: Style,

    /// Background of odd rows when zebra striping is enabled
    pub zebra_bg: Color,

    /// Status line background
    pub status_bg: Color,

    /// Status line text
    pub status_fg: Color,

    /// Error/warning text
    pub error_text: Color,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            normal_text: None, // Use terminal default
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            zebra_bg: Color::DarkGray,
            status_bg: Color::Blue,
            status_fg: Color::White,
            error_text: Color::Red,
        }
    }
}

impl ColorTheme {
    /// Create a monochrome theme for terminals without color support.
    pub fn monochrome() -> Self {
        Self {
            normal_text: None,
            header: Style::default().add_modifier(Modifier::BOLD),
            zebra_bg: Color::Black,
            status_bg: Color::Black,
            status_fg: Color::White,
            error_text: Color::White,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme() {
        let theme = ColorTheme::default();
        assert_eq!(theme.status_bg, Color::Blue);
        assert_eq!(theme.status_fg, Color::White);
        assert!(theme.normal_text.is_none());
    }

    #[test]
    fn test_monochrome_theme() {
        let theme = ColorTheme::monochrome();
        assert_eq!(theme.status_bg, Color::Black);
        assert_eq!(theme.zebra_bg, Color::Black);
    }
}
