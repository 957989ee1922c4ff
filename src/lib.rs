//! Agentdeck - terminal viewer for autonomous agent sessions
//!
//! Shows live agent output, tasks, notes, logs and inbox messages, and lets
//! the user create or edit tasks and notes through modal forms:
//! - Pasted text is sanitized and cut to each field's character budget
//! - Exactly one UI region receives each key, paste or click
//! - Session events arrive through a bounded, drop-on-full queue

pub mod action;
pub mod config;
pub mod feed;
pub mod outbox;
pub mod session;
pub mod tui;

pub use action::Action;
pub use config::ThemeName;
pub use feed::{EventFeed, FeedPoll};
pub use outbox::Outbox;
pub use session::{SessionEvent, SessionSnapshot, SessionStore};

use std::path::PathBuf;
use std::time::Duration;

/// Character budgets of the text-entry surfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub note: usize,
    pub task: usize,
    pub chat: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            note: 500,
            task: 500,
            chat: 2000,
        }
    }
}

/// Configuration for Agentdeck
#[derive(Debug, Clone)]
pub struct DeckConfig {
    /// Session snapshot loaded at startup
    pub session_file: PathBuf,

    /// JSON-lines event source (file or FIFO); `None` disables live updates
    pub events_file: Option<PathBuf>,

    /// Where emitted actions are appended
    pub outbox_file: PathBuf,

    pub theme: ThemeName,

    pub limits: Limits,

    /// How long a toast stays on screen
    pub toast_duration: Duration,

    /// Bounded event queue size; events beyond it are dropped
    pub event_queue_capacity: usize,
}

impl DeckConfig {
    pub fn new(session_file: PathBuf) -> Self {
        let outbox_file = session_file.with_extension("outbox.jsonl");
        Self {
            session_file,
            events_file: None,
            outbox_file,
            theme: ThemeName::default(),
            limits: Limits::default(),
            toast_duration: Duration::from_millis(3000),
            event_queue_capacity: 100,
        }
    }

    pub fn with_events_file(mut self, path: PathBuf) -> Self {
        self.events_file = Some(path);
        self
    }

    pub fn with_outbox_file(mut self, path: PathBuf) -> Self {
        self.outbox_file = path;
        self
    }

    pub fn with_theme(mut self, theme: ThemeName) -> Self {
        self.theme = theme;
        self
    }
}

/// Result type for Agentdeck operations
pub type Result<T> = std::result::Result<T, DeckError>;

/// Errors that can occur in Agentdeck
#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Event feed error: {0}")]
    Feed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}
