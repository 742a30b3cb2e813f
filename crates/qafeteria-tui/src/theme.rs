//! Palette and semantic styles.

use qafeteria_core::NotificationLevel;
use ratatui::style::{Color, Modifier, Style};

// ── Palette ──────────────────────────────────────────────────────────

pub const ACCENT: Color = Color::Rgb(225, 53, 255); // #e135ff
pub const CYAN: Color = Color::Rgb(128, 255, 234); // #80ffea
pub const YELLOW: Color = Color::Rgb(241, 250, 140); // #f1fa8c
pub const GREEN: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const RED: Color = Color::Rgb(255, 99, 99); // #ff6363
pub const BLUE: Color = Color::Rgb(139, 233, 253); // #8be9fd

pub const TEXT: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const MUTED: Color = Color::Rgb(98, 114, 164); // #6272a4
pub const BG_HIGHLIGHT: Color = Color::Rgb(40, 42, 54); // #282a36
pub const BG_DARK: Color = Color::Rgb(30, 31, 41); // #1e1f29

// ── Semantic styles ──────────────────────────────────────────────────

pub fn title_style() -> Style {
    Style::default().fg(CYAN).add_modifier(Modifier::BOLD)
}

pub fn heading() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(ACCENT)
}

pub fn border_default() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn error() -> Style {
    Style::default().fg(RED)
}

/// Enabled button, optionally focused.
pub fn button(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(BG_DARK)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(ACCENT).bg(BG_HIGHLIGHT)
    }
}

pub fn button_disabled() -> Style {
    Style::default().fg(MUTED).bg(BG_HIGHLIGHT)
}

pub fn key_hint() -> Style {
    Style::default().fg(MUTED)
}

pub fn key_hint_key() -> Style {
    Style::default().fg(CYAN).add_modifier(Modifier::BOLD)
}

/// Border color and icon of a toast.
pub fn notification(level: NotificationLevel) -> (Color, &'static str) {
    match level {
        NotificationLevel::Success => (GREEN, "✓"),
        NotificationLevel::Error => (RED, "✗"),
        NotificationLevel::Warning => (YELLOW, "!"),
        NotificationLevel::Info => (BLUE, "i"),
    }
}
