//! Scrolling window over a list with a single selected row.

/// Cursor over `item_count` rows of which `visible_rows` fit on screen.
///
/// Invariant: `scroll_offset <= selected < scroll_offset + visible_rows`
/// whenever `item_count > 0`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OverviewCursor {
    selected: usize,
    scroll_offset: usize,
    visible_rows: usize,
}

impl OverviewCursor {
    pub const fn new(visible_rows: usize) -> Self {
        Self {
            selected: 0,
            scroll_offset: 0,
            visible_rows: if visible_rows == 0 { 1 } else { visible_rows },
        }
    }

    pub const fn selected(&self) -> usize {
        self.selected
    }

    pub const fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub const fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    /// Range of rows currently on screen.
    pub fn window(&self, item_count: usize) -> core::ops::Range<usize> {
        let start = self.scroll_offset.min(item_count);
        start..(start + self.visible_rows).min(item_count)
    }

    /// Move the cursor to `index` (clamped) and scroll minimally to keep it
    /// visible.
    pub fn select(&mut self, index: usize, item_count: usize) {
        self.selected = index.min(item_count.saturating_sub(1));
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + self.visible_rows {
            self.scroll_offset = self.selected + 1 - self.visible_rows;
        }
    }

    pub fn step_prev(&mut self, item_count: usize) {
        self.select(self.selected.saturating_sub(1), item_count);
    }

    pub fn step_next(&mut self, item_count: usize) {
        self.select(self.selected.saturating_add(1), item_count);
    }

    /// Start a fresh view at `index` with the window scrolled to the top.
    pub fn reset_to(&mut self, index: usize, item_count: usize) {
        self.scroll_offset = 0;
        self.select(index, item_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visible(cursor: &OverviewCursor) -> bool {
        cursor.scroll_offset() <= cursor.selected()
            && cursor.selected() < cursor.scroll_offset() + cursor.visible_rows()
    }

    #[test]
    fn stepping_down_keeps_selection_visible() {
        let mut cursor = OverviewCursor::new(5);
        cursor.reset_to(0, 13);
        for expected in 0..=12 {
            assert_eq!(cursor.selected(), expected);
            assert!(visible(&cursor), "row {expected} hidden");
            cursor.step_next(13);
        }
        assert_eq!(cursor.selected(), 12);
        assert_eq!(cursor.scroll_offset(), 8);
    }

    #[test]
    fn scrolling_is_minimal() {
        let mut cursor = OverviewCursor::new(5);
        cursor.reset_to(0, 20);
        cursor.select(4, 20);
        assert_eq!(cursor.scroll_offset(), 0);
        cursor.select(5, 20);
        assert_eq!(cursor.scroll_offset(), 1);
        cursor.select(3, 20);
        assert_eq!(cursor.scroll_offset(), 1);
        cursor.select(0, 20);
        assert_eq!(cursor.scroll_offset(), 0);
    }

    #[test]
    fn jumps_land_inside_window() {
        let mut cursor = OverviewCursor::new(5);
        cursor.reset_to(17, 20);
        assert_eq!(cursor.scroll_offset(), 13);
        assert_eq!(cursor.window(20), 13..18);
        cursor.step_prev(20);
        cursor.step_prev(20);
        assert!(visible(&cursor));
    }

    #[test]
    fn selection_is_clamped_to_item_count() {
        let mut cursor = OverviewCursor::new(5);
        cursor.reset_to(40, 3);
        assert_eq!(cursor.selected(), 2);
        assert_eq!(cursor.window(3), 0..3);
        cursor.step_next(3);
        assert_eq!(cursor.selected(), 2);
    }
}
