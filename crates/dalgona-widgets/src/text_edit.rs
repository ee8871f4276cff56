//! Single-line edit buffer shared by text fields.
//!
//! [`TextEditState`] owns the characters, the cursor and an undo history.
//! [`TextEditState::handle_key`] maps the usual readline bindings onto the
//! buffer so every field that accepts typing (input, search box, combobox)
//! edits the same way.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::VecDeque;
use unicode_width::UnicodeWidthChar;

const HISTORY_LIMIT: usize = 100;

/// What a key did to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The text changed.
    Changed,
    /// Only the cursor moved.
    Moved,
    /// Not an editing key.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Snapshot {
    chars: Vec<char>,
    cursor: usize,
}

#[derive(Debug, Clone, Default)]
pub struct TextEditState {
    chars: Vec<char>,
    cursor: usize,
    max_len: Option<usize>,
    undo: VecDeque<Snapshot>,
    redo: Vec<Snapshot>,
}

impl TextEditState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the buffer at `max` characters.
    pub fn with_max_len(mut self, max: usize) -> Self {
        self.max_len = Some(max);
        self
    }

    pub fn value(&self) -> String {
        self.chars.iter().collect()
    }

    /// Replace the text, put the cursor at the end and forget history.
    pub fn set_value(&mut self, value: &str) {
        self.chars = value.chars().collect();
        if let Some(max) = self.max_len {
            self.chars.truncate(max);
        }
        self.cursor = self.chars.len();
        self.undo.clear();
        self.redo.clear();
    }

    pub fn clear(&mut self) {
        self.set_value("");
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_cursor(&mut self, pos: usize) {
        self.cursor = pos.min(self.chars.len());
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            chars: self.chars.clone(),
            cursor: self.cursor,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.chars = snapshot.chars;
        self.cursor = snapshot.cursor;
    }

    /// Run `edit`; record history only if the text actually changed.
    fn edit(&mut self, edit: impl FnOnce(&mut Self)) -> bool {
        let before = self.snapshot();
        edit(self);
        if self.chars == before.chars {
            return false;
        }
        self.undo.push_back(before);
        if self.undo.len() > HISTORY_LIMIT {
            self.undo.pop_front();
        }
        self.redo.clear();
        true
    }

    pub fn insert(&mut self, c: char) -> bool {
        if self.max_len.is_some_and(|max| self.chars.len() >= max) {
            return false;
        }
        self.edit(|s| {
            s.chars.insert(s.cursor, c);
            s.cursor += 1;
        })
    }

    /// Insert as much of `text` as the length cap allows.
    pub fn insert_str(&mut self, text: &str) -> bool {
        let room = self
            .max_len
            .map_or(usize::MAX, |max| max.saturating_sub(self.chars.len()));
        let incoming: Vec<char> = text.chars().filter(|c| !c.is_control()).take(room).collect();
        self.edit(|s| {
            let at = s.cursor;
            s.cursor += incoming.len();
            s.chars.splice(at..at, incoming);
        })
    }

    pub fn backspace(&mut self) -> bool {
        self.edit(|s| {
            if s.cursor > 0 {
                s.cursor -= 1;
                s.chars.remove(s.cursor);
            }
        })
    }

    pub fn delete(&mut self) -> bool {
        self.edit(|s| {
            if s.cursor < s.chars.len() {
                s.chars.remove(s.cursor);
            }
        })
    }

    pub fn delete_word_back(&mut self) -> bool {
        let start = self.word_start_before(self.cursor);
        self.edit(|s| {
            s.chars.drain(start..s.cursor);
            s.cursor = start;
        })
    }

    pub fn delete_word_forward(&mut self) -> bool {
        let end = self.word_end_after(self.cursor);
        self.edit(|s| {
            s.chars.drain(s.cursor..end);
        })
    }

    pub fn kill_to_start(&mut self) -> bool {
        self.edit(|s| {
            s.chars.drain(..s.cursor);
            s.cursor = 0;
        })
    }

    pub fn kill_to_end(&mut self) -> bool {
        self.edit(|s| s.chars.truncate(s.cursor))
    }

    pub fn undo(&mut self) -> bool {
        match self.undo.pop_back() {
            Some(prev) => {
                self.redo.push(self.snapshot());
                self.restore(prev);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.redo.pop() {
            Some(next) => {
                self.undo.push_back(self.snapshot());
                self.restore(next);
                true
            }
            None => false,
        }
    }

    fn word_start_before(&self, from: usize) -> usize {
        let mut i = from;
        while i > 0 && !self.chars[i - 1].is_alphanumeric() {
            i -= 1;
        }
        while i > 0 && self.chars[i - 1].is_alphanumeric() {
            i -= 1;
        }
        i
    }

    fn word_end_after(&self, from: usize) -> usize {
        let len = self.chars.len();
        let mut i = from;
        while i < len && !self.chars[i].is_alphanumeric() {
            i += 1;
        }
        while i < len && self.chars[i].is_alphanumeric() {
            i += 1;
        }
        i
    }

    fn move_to(&mut self, pos: usize) -> bool {
        let pos = pos.min(self.chars.len());
        let moved = pos != self.cursor;
        self.cursor = pos;
        moved
    }

    /// Apply one key. Enter, Escape, Tab and vertical arrows are left to the caller.
    pub fn handle_key(&mut self, key: KeyEvent) -> EditOutcome {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let changed = |done: bool| {
            if done {
                EditOutcome::Changed
            } else {
                EditOutcome::Ignored
            }
        };
        let moved = |done: bool| {
            if done {
                EditOutcome::Moved
            } else {
                EditOutcome::Ignored
            }
        };
        match key.code {
            KeyCode::Char('w') if ctrl => changed(self.delete_word_back()),
            KeyCode::Char('u') if ctrl => changed(self.kill_to_start()),
            KeyCode::Char('k') if ctrl => changed(self.kill_to_end()),
            KeyCode::Char('z') if ctrl => changed(self.undo()),
            KeyCode::Char('y') if ctrl => changed(self.redo()),
            KeyCode::Char('a') if ctrl => moved(self.move_to(0)),
            KeyCode::Char('e') if ctrl => moved(self.move_to(self.chars.len())),
            KeyCode::Char('d') if alt => changed(self.delete_word_forward()),
            KeyCode::Char(_) if ctrl || alt => EditOutcome::Ignored,
            KeyCode::Char(c) => changed(self.insert(c)),
            KeyCode::Backspace if alt || ctrl => changed(self.delete_word_back()),
            KeyCode::Backspace => changed(self.backspace()),
            KeyCode::Delete if ctrl => changed(self.delete_word_forward()),
            KeyCode::Delete => changed(self.delete()),
            KeyCode::Left if ctrl || alt => moved(self.move_to(self.word_start_before(self.cursor))),
            KeyCode::Right if ctrl || alt => moved(self.move_to(self.word_end_after(self.cursor))),
            KeyCode::Left => moved(self.move_to(self.cursor.saturating_sub(1))),
            KeyCode::Right => moved(self.move_to(self.cursor + 1)),
            KeyCode::Home => moved(self.move_to(0)),
            KeyCode::End => moved(self.move_to(self.chars.len())),
            _ => EditOutcome::Ignored,
        }
    }

    /// Slice of the text that fits in `width` columns with the cursor visible,
    /// and the cursor's column within that slice.
    pub fn window(&self, width: usize) -> (String, usize) {
        if width == 0 {
            return (String::new(), 0);
        }
        let col = |c: &char| c.width().unwrap_or(0);
        // Walk back from the cursor until the viewport (minus one cell for
        // the cursor itself) is full.
        let mut start = self.cursor;
        let mut used = 0;
        while start > 0 {
            let w = col(&self.chars[start - 1]);
            if used + w >= width {
                break;
            }
            used += w;
            start -= 1;
        }
        let mut shown = String::new();
        let mut total = 0;
        for c in &self.chars[start..] {
            let w = col(c);
            if total + w > width {
                break;
            }
            total += w;
            shown.push(*c);
        }
        (shown, used)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> KeyEvent {
        with(code, KeyModifiers::NONE)
    }

    fn with(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn typed(text: &str) -> TextEditState {
        let mut state = TextEditState::new();
        for c in text.chars() {
            state.handle_key(key(KeyCode::Char(c)));
        }
        state
    }

    #[test]
    fn typing_and_backspace() {
        let mut state = typed("cat");
        assert_eq!(state.value(), "cat");
        assert_eq!(state.handle_key(key(KeyCode::Backspace)), EditOutcome::Changed);
        assert_eq!(state.value(), "ca");
        state.set_cursor(0);
        assert_eq!(state.handle_key(key(KeyCode::Backspace)), EditOutcome::Ignored);
    }

    #[test]
    fn insert_in_middle() {
        let mut state = typed("ac");
        state.handle_key(key(KeyCode::Left));
        state.handle_key(key(KeyCode::Char('b')));
        assert_eq!(state.value(), "abc");
        assert_eq!(state.cursor(), 2);
    }

    #[test]
    fn word_motion_and_delete() {
        let mut state = typed("hello big world");
        state.handle_key(with(KeyCode::Left, KeyModifiers::CONTROL));
        assert_eq!(state.cursor(), 10);
        state.handle_key(with(KeyCode::Left, KeyModifiers::CONTROL));
        assert_eq!(state.cursor(), 6);
        state.handle_key(with(KeyCode::Char('d'), KeyModifiers::ALT));
        assert_eq!(state.value(), "hello  world");
        state.handle_key(key(KeyCode::End));
        state.handle_key(with(KeyCode::Char('w'), KeyModifiers::CONTROL));
        assert_eq!(state.value(), "hello  ");
    }

    #[test]
    fn kill_to_start_and_end() {
        let mut state = typed("abcdef");
        state.set_cursor(3);
        state.handle_key(with(KeyCode::Char('k'), KeyModifiers::CONTROL));
        assert_eq!(state.value(), "abc");
        state.set_cursor(1);
        state.handle_key(with(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(state.value(), "bc");
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn undo_redo_round() {
        let mut state = typed("ab");
        assert!(state.undo());
        assert_eq!(state.value(), "a");
        assert!(state.redo());
        assert_eq!(state.value(), "ab");
        assert!(!state.redo());
    }

    #[test]
    fn new_edit_drops_redo() {
        let mut state = typed("ab");
        state.undo();
        state.insert('x');
        assert!(!state.redo());
        assert_eq!(state.value(), "ax");
    }

    #[test]
    fn cursor_moves_do_not_record_history() {
        let mut state = typed("a");
        state.handle_key(key(KeyCode::Home));
        assert!(state.undo());
        assert_eq!(state.value(), "");
        assert!(!state.undo());
    }

    #[test]
    fn max_len_caps_typing_and_paste() {
        let mut state = TextEditState::new().with_max_len(3);
        state.insert_str("abcdef");
        assert_eq!(state.value(), "abc");
        assert!(!state.insert('z'));
    }

    #[test]
    fn control_chords_are_not_inserted() {
        let mut state = TextEditState::new();
        assert_eq!(
            state.handle_key(with(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            EditOutcome::Ignored
        );
        assert!(state.is_empty());
        assert_eq!(state.handle_key(key(KeyCode::Enter)), EditOutcome::Ignored);
    }

    #[test]
    fn window_follows_cursor() {
        let state = typed("abcdefghij");
        let (shown, col) = state.window(4);
        assert_eq!(shown, "hij");
        assert_eq!(col, 3);

        let mut state = typed("abcdefghij");
        state.set_cursor(0);
        let (shown, col) = state.window(4);
        assert_eq!(shown, "abcd");
        assert_eq!(col, 0);
    }
}
