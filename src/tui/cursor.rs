//! Selection cursor for list panels

/// Index of the highlighted row in a list of `len` items.
///
/// Always within `[0, len - 1]`, or 0 when the list is empty. Navigation
/// stops at the ends instead of wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollCursor {
    index: usize,
    len: usize,
}

/// `min(cursor, count - 1)`, or 0 for an empty collection.
pub fn clamp_cursor(cursor: usize, count: usize) -> usize {
    if count == 0 {
        0
    } else {
        cursor.min(count - 1)
    }
}

impl ScrollCursor {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The selected index, or `None` when there is nothing to select.
    pub fn selected(&self) -> Option<usize> {
        (self.len > 0).then_some(self.index)
    }

    /// Called whenever the backing collection is replaced.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.index = clamp_cursor(self.index, len);
    }

    pub fn next(&mut self) {
        self.index = clamp_cursor(self.index.saturating_add(1), self.len);
    }

    pub fn prev(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    pub fn first(&mut self) {
        self.index = 0;
    }

    pub fn last(&mut self) {
        self.index = clamp_cursor(usize::MAX, self.len);
    }

    pub fn select(&mut self, index: usize) {
        self.index = clamp_cursor(index, self.len);
    }

    /// First row to draw so the selection stays inside a window of `height` rows.
    pub fn window_start(&self, height: usize) -> usize {
        if height == 0 || self.index < height {
            0
        } else {
            self.index + 1 - height
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_cursor() {
        assert_eq!(clamp_cursor(5, 0), 0);
        assert_eq!(clamp_cursor(5, 3), 2);
        assert_eq!(clamp_cursor(1, 3), 1);
    }

    #[test]
    fn test_shrinking_list_clamps_to_new_end() {
        let mut cursor = ScrollCursor::new(10);
        cursor.last();
        assert_eq!(cursor.index(), 9);
        cursor.set_len(4);
        assert_eq!(cursor.index(), 3);
        cursor.set_len(0);
        assert_eq!(cursor.index(), 0);
        assert_eq!(cursor.selected(), None);
    }

    #[test]
    fn test_navigation_does_not_wrap() {
        let mut cursor = ScrollCursor::new(3);
        cursor.prev();
        assert_eq!(cursor.index(), 0);
        cursor.next();
        cursor.next();
        cursor.next();
        assert_eq!(cursor.index(), 2);
    }

    #[test]
    fn test_empty_navigation_stays_at_zero() {
        let mut cursor = ScrollCursor::new(0);
        cursor.next();
        cursor.last();
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn test_window_start_follows_selection() {
        let mut cursor = ScrollCursor::new(20);
        cursor.select(12);
        assert_eq!(cursor.window_start(5), 8);
        cursor.select(2);
        assert_eq!(cursor.window_start(5), 0);
    }
}
