//! Color theme for the TUI - using ANSI colors for better terminal compatibility
//!
//! A `Theme` is a plain value owned by the application and passed by
//! reference into every render function.

use ratatui::style::{Color, Modifier, Style};

use crate::config::ThemeName;
use crate::session::{LogLevel, NoteType, Priority};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub accent: Color,
    pub text: Color,
    pub muted: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            accent: Color::Cyan,
            text: Color::Reset,
            muted: Color::DarkGray,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            info: Color::Blue,
            highlight_fg: Color::Black,
            highlight_bg: Color::Cyan,
        }
    }

    pub fn light() -> Self {
        Self {
            accent: Color::Blue,
            text: Color::Black,
            muted: Color::Gray,
            success: Color::Green,
            warning: Color::Magenta,
            error: Color::Red,
            info: Color::Blue,
            highlight_fg: Color::White,
            highlight_bg: Color::Blue,
        }
    }

    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
        }
    }

    // Semantic styles
    pub fn title(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn dim(&self) -> Style {
        Style::default().add_modifier(Modifier::DIM)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Selected list row, or focused button
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.highlight_fg)
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn toast(&self) -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(self.warning)
            .add_modifier(Modifier::BOLD)
    }

    // Key hints
    pub fn key(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn key_desc(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn priority(&self, priority: Priority) -> Style {
        match priority {
            Priority::Low => self.muted(),
            Priority::Medium => self.text(),
            Priority::High => self.warning(),
            Priority::Urgent => self.error().add_modifier(Modifier::BOLD),
        }
    }

    pub fn note_type(&self, note_type: NoteType) -> Style {
        match note_type {
            NoteType::Observation => Style::default().fg(self.info),
            NoteType::Decision => self.success(),
            NoteType::Blocker => self.error(),
            NoteType::Todo => self.warning(),
        }
    }

    pub fn log_level(&self, level: LogLevel) -> Style {
        match level {
            LogLevel::Debug => self.muted(),
            LogLevel::Info => self.text(),
            LogLevel::Warn => self.warning(),
            LogLevel::Error => self.error(),
        }
    }
}
