use ratatui::style::Color;

/// Process-wide theme mode, flipped by the theme-toggle action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggle(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// Header icon for the toggle action: shows the mode you would switch to.
    pub fn icon(&self) -> &'static str {
        match self {
            ThemeMode::Light => "☾",
            ThemeMode::Dark => "☀",
        }
    }
}

// Derived styles. Colors are computed from the mode on every render rather
// than patched onto stored messages, so a toggle repaints the whole chat
// and the footer in one frame.

/// Body text color for chat messages.
pub fn message_fg(mode: ThemeMode) -> Color {
    match mode {
        ThemeMode::Light => Color::Black,
        ThemeMode::Dark => Color::White,
    }
}

/// Dimmed color for sender labels ("You:", "Translated Text:").
pub fn sender_fg(mode: ThemeMode) -> Color {
    match mode {
        ThemeMode::Light => Color::DarkGray,
        ThemeMode::Dark => Color::Gray,
    }
}

/// Footer attribution text color, tracks the theme like message text.
pub fn footer_fg(mode: ThemeMode) -> Color {
    message_fg(mode)
}

/// Background for the chat panel.
pub fn panel_bg(mode: ThemeMode) -> Color {
    match mode {
        ThemeMode::Light => Color::Reset,
        ThemeMode::Dark => Color::Black,
    }
}
