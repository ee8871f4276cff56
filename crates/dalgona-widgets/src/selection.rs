//! Highlight and scroll state for option lists.
//!
//! `SelectionState` tracks which row is highlighted and which row is at the
//! top of the viewport for a list where some rows may be disabled. Movement
//! wraps and always lands on an enabled row; the viewport follows the
//! highlight.

pub struct SelectionState {
    cursor: usize,
    offset: usize,
    enabled: Vec<bool>,
    visible: usize,
}

impl SelectionState {
    /// `count` rows, all enabled, `visible` rows tall.
    pub fn new(count: usize, visible: usize) -> Self {
        Self {
            cursor: 0,
            offset: 0,
            enabled: vec![true; count],
            visible,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn count(&self) -> usize {
        self.enabled.len()
    }

    pub fn visible(&self) -> usize {
        self.visible
    }

    pub fn is_enabled(&self, index: usize) -> bool {
        self.enabled.get(index).copied().unwrap_or(false)
    }

    /// Replace the rows. The highlight moves to the nearest enabled row.
    pub fn set_enabled(&mut self, enabled: Vec<bool>) {
        self.enabled = enabled;
        if self.enabled.is_empty() {
            self.cursor = 0;
            self.offset = 0;
            return;
        }
        self.cursor = self.cursor.min(self.enabled.len() - 1);
        if !self.is_enabled(self.cursor) {
            self.cursor = self.seek(self.cursor, true).unwrap_or(self.cursor);
        }
        self.ensure_visible();
    }

    pub fn set_visible(&mut self, visible: usize) {
        self.visible = visible;
        self.ensure_visible();
    }

    pub fn has_enabled(&self) -> bool {
        self.enabled.iter().any(|&e| e)
    }

    /// Next enabled row strictly after `from` (or before, when `forward` is
    /// false), wrapping once around the list.
    fn seek(&self, from: usize, forward: bool) -> Option<usize> {
        let n = self.enabled.len();
        (1..=n)
            .map(|step| {
                if forward {
                    (from + step) % n
                } else {
                    (from + n - step % n) % n
                }
            })
            .find(|&i| self.enabled[i])
    }

    pub fn move_down(&mut self) {
        if let Some(next) = self.seek(self.cursor, true) {
            self.cursor = next;
            self.ensure_visible();
        }
    }

    pub fn move_up(&mut self) {
        if let Some(prev) = self.seek(self.cursor, false) {
            self.cursor = prev;
            self.ensure_visible();
        }
    }

    pub fn home(&mut self) {
        if let Some(first) = self.enabled.iter().position(|&e| e) {
            self.cursor = first;
            self.ensure_visible();
        }
    }

    pub fn end(&mut self) {
        if let Some(last) = self.enabled.iter().rposition(|&e| e) {
            self.cursor = last;
            self.ensure_visible();
        }
    }

    /// Jump a viewport down, then settle on the nearest enabled row at or
    /// before the target.
    pub fn page_down(&mut self) {
        if self.enabled.is_empty() {
            return;
        }
        let target = (self.cursor + self.visible.max(1)).min(self.enabled.len() - 1);
        if let Some(row) = (self.cursor..=target).rev().find(|&i| self.enabled[i]) {
            self.cursor = row;
            self.ensure_visible();
        }
    }

    pub fn page_up(&mut self) {
        if self.enabled.is_empty() {
            return;
        }
        let target = self.cursor.saturating_sub(self.visible.max(1));
        if let Some(row) = (target..=self.cursor).find(|&i| self.enabled[i]) {
            self.cursor = row;
            self.ensure_visible();
        }
    }

    /// Highlight `index` if it exists and is enabled. Returns whether it moved.
    pub fn select(&mut self, index: usize) -> bool {
        if !self.is_enabled(index) {
            return false;
        }
        self.cursor = index;
        self.ensure_visible();
        true
    }

    /// Scroll so that `index` sits `lead` rows below the top of the viewport,
    /// clamped so the viewport never runs past the end.
    pub fn scroll_to(&mut self, index: usize, lead: usize) {
        let max_offset = self.enabled.len().saturating_sub(self.visible);
        self.offset = index.saturating_sub(lead).min(max_offset);
    }

    fn ensure_visible(&mut self) {
        if self.enabled.is_empty() || self.visible == 0 {
            return;
        }
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + self.visible {
            self.offset = self.cursor + 1 - self.visible;
        }
    }
}
