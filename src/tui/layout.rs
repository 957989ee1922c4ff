//! Screen regions, shared by rendering and mouse hit-testing.

use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use unicode_width::UnicodeWidthStr;

/// Top-level views of the primary region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Output,
    Tasks,
    Notes,
    Inbox,
}

impl View {
    pub const ALL: [View; 4] = [View::Output, View::Tasks, View::Notes, View::Inbox];

    pub fn label(self) -> &'static str {
        match self {
            View::Output => " 1 Output ",
            View::Tasks => " 2 Tasks ",
            View::Notes => " 3 Notes ",
            View::Inbox => " 4 Inbox ",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|v| *v == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// `"1"`..`"4"`
    pub fn from_digit(key: &str) -> Option<Self> {
        match key {
            "1" => Some(View::Output),
            "2" => Some(View::Tasks),
            "3" => Some(View::Notes),
            "4" => Some(View::Inbox),
            _ => None,
        }
    }
}

/// Width of the separator drawn between tab labels
pub const TAB_SEPARATOR: &str = "│";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub tabs: Rect,
    pub main: Rect,
    /// Chat prompt; zero-height outside the output view
    pub chat: Rect,
    pub status: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect, view: View) -> Self {
        let chat_height = if view == View::Output { 3 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),           // Header
                Constraint::Length(1),           // Tabs
                Constraint::Min(3),              // Main
                Constraint::Length(chat_height), // Chat
                Constraint::Length(1),           // Status / help
            ])
            .split(area);

        Self {
            header: chunks[0],
            tabs: chunks[1],
            main: chunks[2],
            chat: chunks[3],
            status: chunks[4],
        }
    }

    /// Which tab label, if any, sits under `column` on the tab row.
    pub fn tab_at(&self, column: u16, row: u16) -> Option<View> {
        if !self.tabs.contains(Position::new(column, row)) {
            return None;
        }
        let mut x = self.tabs.x;
        for view in View::ALL {
            let width = view.label().width() as u16;
            if column >= x && column < x + width {
                return Some(view);
            }
            x += width + TAB_SEPARATOR.width() as u16;
        }
        None
    }

    /// Rows of a bordered list drawn in the main region.
    pub fn list_inner(&self) -> Rect {
        Rect {
            x: self.main.x.saturating_add(1),
            y: self.main.y.saturating_add(1),
            width: self.main.width.saturating_sub(2),
            height: self.main.height.saturating_sub(2),
        }
    }

    /// Item index under a click, given the first row currently drawn.
    pub fn list_row_at(&self, column: u16, row: u16, window_start: usize) -> Option<usize> {
        let inner = self.list_inner();
        if !inner.contains(Position::new(column, row)) {
            return None;
        }
        Some(window_start + (row - inner.y) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_cycle() {
        assert_eq!(View::Inbox.next(), View::Output);
        assert_eq!(View::Output.prev(), View::Inbox);
        assert_eq!(View::from_digit("3"), Some(View::Notes));
        assert_eq!(View::from_digit("9"), None);
    }

    #[test]
    fn test_chat_only_in_output_view() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(ScreenLayout::new(area, View::Output).chat.height, 3);
        assert_eq!(ScreenLayout::new(area, View::Tasks).chat.height, 0);
    }

    #[test]
    fn test_tab_hit_testing() {
        let layout = ScreenLayout::new(Rect::new(0, 0, 80, 24), View::Tasks);
        let row = layout.tabs.y;
        assert_eq!(layout.tab_at(0, row), Some(View::Output));
        let second = View::Output.label().width() as u16 + 1;
        assert_eq!(layout.tab_at(second, row), Some(View::Tasks));
        assert_eq!(layout.tab_at(79, row), None);
        assert_eq!(layout.tab_at(0, row + 5), None);
    }

    #[test]
    fn test_list_row_hit_testing() {
        let layout = ScreenLayout::new(Rect::new(0, 0, 80, 24), View::Tasks);
        let inner = layout.list_inner();
        assert_eq!(layout.list_row_at(inner.x, inner.y + 2, 10), Some(12));
        assert_eq!(layout.list_row_at(0, 0, 0), None);
    }
}
