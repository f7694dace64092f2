//! Single-line text field used by every form.
//!
//! Cursor positions are in char units; rendering converts to columns.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Glyph drawn in place of each character of a masked field.
const MASK_CHAR: char = '•';

#[derive(Debug, Clone, Default)]
pub struct TextField {
    value: String,
    cursor: usize,
    masked: bool,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    /// A field whose contents are never displayed (passwords).
    pub fn masked() -> Self {
        Self {
            masked: true,
            ..Self::default()
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Replaces the contents and puts the cursor at the end.
    pub fn set(&mut self, value: &str) {
        self.value = single_line(value);
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, ch: char) {
        let idx = byte_index(&self.value, self.cursor);
        self.value.insert(idx, ch);
        self.cursor += 1;
    }

    /// Inserts pasted text; line breaks become spaces.
    pub fn insert_str(&mut self, text: &str) {
        let text = single_line(text);
        let idx = byte_index(&self.value, self.cursor);
        self.value.insert_str(idx, &text);
        self.cursor += text.chars().count();
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        self.remove_at(self.cursor);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.remove_at(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    /// Applies an editing key. Returns true if the key was consumed.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        if matches!(key.kind, KeyEventKind::Release) {
            return false;
        }

        match key.code {
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert_char(ch);
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => return false,
        }
        true
    }

    /// Text as it should appear on screen.
    pub fn display(&self) -> String {
        if self.masked {
            std::iter::repeat_n(MASK_CHAR, self.value.chars().count()).collect()
        } else {
            self.value.clone()
        }
    }

    fn remove_at(&mut self, char_idx: usize) {
        let start = byte_index(&self.value, char_idx);
        let end = byte_index(&self.value, char_idx + 1);
        self.value.replace_range(start..end, "");
    }
}

fn byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map_or(s.len(), |(i, _)| i)
}

fn single_line(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}
