//! Read-only overlays: the logs overlay and the subagent modal.
//!
//! Neither accepts text; pastes are dropped and only navigation keys do
//! anything.

use super::cursor::ScrollCursor;
use crate::session::Subagent;

/// Result of a key press on an overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEvent {
    None,
    Closed,
}

fn navigate(cursor: &mut ScrollCursor, key: &str) -> bool {
    match key {
        "j" | "down" => cursor.next(),
        "k" | "up" => cursor.prev(),
        "g" | "home" => cursor.first(),
        "G" | "end" => cursor.last(),
        "pgdown" => {
            for _ in 0..10 {
                cursor.next();
            }
        }
        "pgup" => {
            for _ in 0..10 {
                cursor.prev();
            }
        }
        _ => return false,
    }
    true
}

/// Session log viewer
#[derive(Debug, Clone, Default)]
pub struct LogsOverlay {
    visible: bool,
    cursor: ScrollCursor,
}

impl LogsOverlay {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn cursor(&self) -> &ScrollCursor {
        &self.cursor
    }

    /// Show the overlay scrolled to the newest entry.
    pub fn show(&mut self, entries: usize) {
        self.visible = true;
        self.cursor.set_len(entries);
        self.cursor.last();
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn set_len(&mut self, entries: usize) {
        self.cursor.set_len(entries);
    }

    pub fn handle_key(&mut self, key: &str) -> OverlayEvent {
        if !self.visible {
            return OverlayEvent::None;
        }
        match key {
            "esc" | "L" | "q" => {
                self.close();
                OverlayEvent::Closed
            }
            _ => {
                navigate(&mut self.cursor, key);
                OverlayEvent::None
            }
        }
    }
}

/// Detail view of the subagent working on a task.
///
/// Exists only while shown; closing drops the instance.
#[derive(Debug, Clone)]
pub struct SubagentModal {
    pub task_id: String,
    pub task_content: String,
    pub subagent: Subagent,
    visible: bool,
    cursor: ScrollCursor,
}

impl SubagentModal {
    pub fn new(task_id: String, task_content: String, subagent: Subagent) -> Self {
        let cursor = ScrollCursor::new(subagent.output.len());
        Self {
            task_id,
            task_content,
            subagent,
            visible: true,
            cursor,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn cursor(&self) -> &ScrollCursor {
        &self.cursor
    }

    /// Refresh from a new session snapshot; keeps the scroll position valid.
    pub fn refresh(&mut self, subagent: Subagent) {
        self.cursor.set_len(subagent.output.len());
        self.subagent = subagent;
    }

    pub fn handle_key(&mut self, key: &str) -> OverlayEvent {
        match key {
            "esc" | "q" => {
                self.visible = false;
                OverlayEvent::Closed
            }
            _ => {
                navigate(&mut self.cursor, key);
                OverlayEvent::None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subagent(lines: usize) -> Subagent {
        Subagent {
            name: "researcher".to_string(),
            status: "running".to_string(),
            output: (0..lines).map(|i| format!("line {i}")).collect(),
        }
    }

    #[test]
    fn test_logs_overlay_opens_at_newest() {
        let mut logs = LogsOverlay::default();
        logs.show(5);
        assert!(logs.is_visible());
        assert_eq!(logs.cursor().index(), 4);
        logs.handle_key("k");
        assert_eq!(logs.cursor().index(), 3);
        assert_eq!(logs.handle_key("esc"), OverlayEvent::Closed);
        assert!(!logs.is_visible());
    }

    #[test]
    fn test_subagent_refresh_clamps() {
        let mut modal = SubagentModal::new("t1".into(), "task".into(), subagent(10));
        modal.handle_key("G");
        assert_eq!(modal.cursor().index(), 9);
        modal.refresh(subagent(3));
        assert_eq!(modal.cursor().index(), 2);
    }

    #[test]
    fn test_subagent_close() {
        let mut modal = SubagentModal::new("t1".into(), "task".into(), subagent(1));
        assert_eq!(modal.handle_key("esc"), OverlayEvent::Closed);
        assert!(!modal.is_visible());
    }
}
