//! Character-limited text buffers
//!
//! Note: `cursor` and `limit` count CHARACTERS (Unicode scalar values), never
//! bytes. A CJK character or an emoji costs exactly one unit of budget.

use std::fmt;

/// How many pasted characters did not fit into a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Truncation {
    pub dropped: usize,
}

impl fmt::Display for Truncation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} chars truncated", self.dropped)
    }
}

/// A text buffer that never holds more than `limit` characters.
#[derive(Debug, Clone)]
pub struct BoundedInput {
    buffer: String,
    /// Cursor position in buffer (character index, not byte index!)
    cursor: usize,
    limit: usize,
}

impl BoundedInput {
    pub fn new(limit: usize) -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            limit,
        }
    }

    pub fn content(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn char_count(&self) -> usize {
        self.buffer.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Characters that can still be added before hitting the limit.
    pub fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.char_count())
    }

    /// True when the content is empty after trimming whitespace.
    pub fn is_blank(&self) -> bool {
        self.buffer.trim().is_empty()
    }

    /// Convert character index to byte index
    fn char_to_byte_index(&self, char_idx: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_idx)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(self.buffer.len())
    }

    /// Insert a typed character. Refused once the buffer is full.
    pub fn insert_char(&mut self, c: char) -> bool {
        if self.remaining() == 0 {
            return false;
        }
        let byte_idx = self.char_to_byte_index(self.cursor);
        self.buffer.insert(byte_idx, c);
        self.cursor += 1;
        true
    }

    /// Insert already-sanitized paste text, keeping as much as fits.
    ///
    /// Returns `None` when everything was inserted (including the empty
    /// paste). A paste into a full buffer reports its entire length.
    pub fn insert_bounded(&mut self, text: &str) -> Option<Truncation> {
        let incoming = text.chars().count();
        if incoming == 0 {
            return None;
        }

        let remaining = self.remaining();
        if remaining == 0 {
            return Some(Truncation { dropped: incoming });
        }

        let kept: String = text.chars().take(remaining).collect();
        let byte_idx = self.char_to_byte_index(self.cursor);
        self.buffer.insert_str(byte_idx, &kept);
        self.cursor += incoming.min(remaining);

        if incoming <= remaining {
            None
        } else {
            Some(Truncation {
                dropped: incoming - remaining,
            })
        }
    }

    /// Remove the character before the cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_idx = self.char_to_byte_index(self.cursor);
            if let Some(ch) = self.buffer[byte_idx..].chars().next() {
                self.buffer.replace_range(byte_idx..byte_idx + ch.len_utf8(), "");
            }
        }
    }

    /// Remove the character at the cursor position
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let byte_idx = self.char_to_byte_index(self.cursor);
            if let Some(ch) = self.buffer[byte_idx..].chars().next() {
                self.buffer.replace_range(byte_idx..byte_idx + ch.len_utf8(), "");
            }
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Replace the content, cutting it down to the limit if needed.
    pub fn set_content(&mut self, content: &str) -> Option<Truncation> {
        self.buffer = content.chars().take(self.limit).collect();
        self.cursor = self.char_count();
        let dropped = content.chars().count() - self.cursor;
        (dropped > 0).then_some(Truncation { dropped })
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Line index and character column of the cursor, for multi-line display.
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let mut line = 0;
        let mut col = 0;
        for ch in self.buffer.chars().take(self.cursor) {
            if ch == '\n' {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        (line, col)
    }

    /// Get cursor position for display (in terminal columns) on the cursor's line.
    pub fn cursor_display_width(&self) -> usize {
        let (_, col) = self.cursor_line_col();
        let line_start = self.cursor - col;
        self.buffer
            .chars()
            .skip(line_start)
            .take(col)
            .map(|c| unicode_width::UnicodeWidthChar::width(c).unwrap_or(1))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(limit: usize, len: usize) -> BoundedInput {
        let mut input = BoundedInput::new(limit);
        input.set_content(&"x".repeat(len));
        input
    }

    #[test]
    fn test_insert_unicode_counts_chars() {
        let mut input = BoundedInput::new(3);
        assert!(input.insert_char('\u{4f60}'));
        assert!(input.insert_char('\u{597d}'));
        assert!(input.insert_char('!'));
        assert!(!input.insert_char('?'));
        assert_eq!(input.content(), "\u{4f60}\u{597d}!");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn test_paste_partially_fits() {
        let mut input = filled(500, 400);
        let paste = "y".repeat(300);
        let report = input.insert_bounded(&paste);
        assert_eq!(input.char_count(), 500);
        assert_eq!(report, Some(Truncation { dropped: 200 }));
    }

    #[test]
    fn test_paste_into_full_buffer_reports_everything() {
        let mut input = filled(500, 500);
        let report = input.insert_bounded("twenty-four characters!!");
        assert_eq!(input.char_count(), 500);
        assert_eq!(report.map(|t| t.to_string()), Some("24 chars truncated".to_string()));
    }

    #[test]
    fn test_paste_exactly_fills() {
        let mut input = filled(10, 6);
        assert_eq!(input.insert_bounded("abcd"), None);
        assert_eq!(input.char_count(), 10);
    }

    #[test]
    fn test_empty_paste_is_noop() {
        let mut input = filled(10, 10);
        assert_eq!(input.insert_bounded(""), None);
        assert_eq!(input.char_count(), 10);
    }

    #[test]
    fn test_paste_truncates_by_char_not_byte() {
        let mut input = BoundedInput::new(2);
        let report = input.insert_bounded("\u{1f600}\u{1f601}\u{1f602}");
        assert_eq!(input.content(), "\u{1f600}\u{1f601}");
        assert_eq!(report, Some(Truncation { dropped: 1 }));
    }

    #[test]
    fn test_paste_inserts_at_cursor() {
        let mut input = BoundedInput::new(20);
        input.set_content("hello world");
        input.move_home();
        for _ in 0..5 {
            input.move_right();
        }
        assert_eq!(input.insert_bounded(","), None);
        assert_eq!(input.content(), "hello, world");
        assert_eq!(input.cursor(), 6);
    }

    #[test]
    fn test_zero_limit_rejects_everything() {
        let mut input = BoundedInput::new(0);
        assert!(!input.insert_char('a'));
        assert_eq!(input.insert_bounded("abc"), Some(Truncation { dropped: 3 }));
        assert!(input.is_empty());
    }

    #[test]
    fn test_backspace_unicode() {
        let mut input = BoundedInput::new(10);
        input.set_content("\u{4f60}\u{597d}");
        input.backspace();
        assert_eq!(input.content(), "\u{4f60}");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn test_set_content_respects_limit() {
        let mut input = BoundedInput::new(4);
        assert_eq!(input.set_content("abcdefgh"), Some(Truncation { dropped: 4 }));
        assert_eq!(input.content(), "abcd");
        assert_eq!(input.set_content("ab"), None);
    }

    #[test]
    fn test_cursor_line_col() {
        let mut input = BoundedInput::new(50);
        input.set_content("ab\ncde");
        assert_eq!(input.cursor_line_col(), (1, 3));
        assert_eq!(input.cursor_display_width(), 3);
    }

    #[test]
    fn test_blank_detection() {
        let mut input = BoundedInput::new(50);
        input.set_content("   \n\t  \n  ");
        assert!(input.is_blank());
    }
}
