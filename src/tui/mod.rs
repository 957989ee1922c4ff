//! Terminal User Interface module
//!
//! The interactive surface of agentdeck. [`AppState`] is a pure state
//! machine that can be driven from tests; [`App`] wires it to a real
//! terminal, the event feed and the outbox.

mod app;
mod clipboard_paste;
pub mod cursor;
pub mod focus;
pub mod input;
pub mod keys;
pub mod layout;
pub mod modal;
pub mod overlay;
pub mod sanitize;
pub mod state;
mod theme;
pub mod toast;
mod widgets;

pub use app::App;
pub use cursor::{clamp_cursor, ScrollCursor};
pub use focus::{route, FocusTarget, Visibility};
pub use input::{BoundedInput, Truncation};
pub use layout::View;
pub use sanitize::{collapse_newlines, sanitize, sanitize_single_line};
pub use state::{AppMessage, AppState, Effect};
pub use theme::Theme;
pub use widgets::draw;
