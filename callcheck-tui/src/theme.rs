//! Theme tokens for the CallCheck TUI.
//!
//! Dark background with neon accents. Series and annotation colors come from
//! the views as `#rrggbb` strings and are converted here.

use ratatui::style::{Color, Modifier, Style};

use callcheck_core::Direction;

pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT: Color = Color::White;

/// Parse `#rrggbb`; anything else yields `None`.
pub fn hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Like [`hex_color`], falling back to the accent.
pub fn hex_or_accent(hex: &str) -> Color {
    hex_color(hex).unwrap_or(ACCENT)
}

/// Down confirms the call.
pub fn direction_color(direction: Option<Direction>) -> Color {
    match direction {
        Some(Direction::Down) => POSITIVE,
        Some(Direction::Up) => NEGATIVE,
        None => MUTED,
    }
}

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(NEUTRAL)
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        Style::default().fg(NEUTRAL)
    }
}
