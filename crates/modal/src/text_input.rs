/// Single-line text input with cursor management.
///
/// The cursor is tracked in characters, not bytes. A value can be
/// "selected" (as after opening a dialog with the value pre-selected): the
/// next edit then replaces the whole value.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    input: String,
    cursor_pos: usize, // Position in characters, not bytes
    selected: bool,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input holding `text`, cursor at the end
    pub fn with_text(text: impl Into<String>) -> Self {
        let input = text.into();
        let cursor_pos = input.chars().count();
        Self {
            input,
            cursor_pos,
            selected: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.input
    }

    /// Cursor position in characters
    pub fn cursor_pos(&self) -> usize {
        self.cursor_pos
    }

    /// Replace the value and move the cursor to the end
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.cursor_pos = self.input.chars().count();
        self.selected = false;
    }

    /// Select the whole value
    pub fn select_all(&mut self) {
        self.selected = !self.input.is_empty();
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor_pos)
            .map(|(idx, _)| idx)
            .unwrap_or(self.input.len())
    }

    /// Drop a selected value. Returns true if something was removed.
    fn take_selection(&mut self) -> bool {
        if !self.selected {
            return false;
        }
        self.selected = false;
        self.input.clear();
        self.cursor_pos = 0;
        true
    }

    /// Insert a character at the cursor, replacing a selected value
    pub fn insert(&mut self, c: char) {
        self.take_selection();
        let byte_idx = self.byte_index();
        self.input.insert(byte_idx, c);
        self.cursor_pos += 1;
    }

    /// Delete character before cursor (backspace)
    pub fn backspace(&mut self) -> bool {
        if self.take_selection() {
            return true;
        }
        if self.cursor_pos > 0 {
            self.cursor_pos -= 1;
            let byte_idx = self.byte_index();
            self.input.remove(byte_idx);
            true
        } else {
            false
        }
    }

    /// Delete character at cursor (delete key)
    pub fn delete(&mut self) -> bool {
        if self.take_selection() {
            return true;
        }
        if self.cursor_pos < self.input.chars().count() {
            let byte_idx = self.byte_index();
            self.input.remove(byte_idx);
            true
        } else {
            false
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.selected = false;
        if self.cursor_pos > 0 {
            self.cursor_pos -= 1;
            true
        } else {
            false
        }
    }

    pub fn move_right(&mut self) -> bool {
        self.selected = false;
        if self.cursor_pos < self.input.chars().count() {
            self.cursor_pos += 1;
            true
        } else {
            false
        }
    }

    pub fn move_home(&mut self) {
        self.selected = false;
        self.cursor_pos = 0;
    }

    pub fn move_end(&mut self) {
        self.selected = false;
        self.cursor_pos = self.input.chars().count();
    }

    /// Text before cursor (for rendering)
    pub fn text_before_cursor(&self) -> &str {
        &self.input[..self.byte_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing_multibyte() {
        let mut input = TextInput::with_text("ёж");
        assert_eq!(input.cursor_pos(), 2);

        input.move_left();
        input.insert('и');
        assert_eq!(input.text(), "ёиж");
        assert_eq!(input.text_before_cursor(), "ёи");

        assert!(input.backspace());
        assert!(input.delete());
        assert_eq!(input.text(), "ё");
        assert!(!input.delete());
    }

    #[test]
    fn test_typing_replaces_selected_value() {
        let mut input = TextInput::with_text("old");
        input.select_all();
        input.insert('n');
        assert_eq!(input.text(), "n");
        assert!(!input.is_selected());
    }

    #[test]
    fn test_backspace_clears_selected_value() {
        let mut input = TextInput::with_text("old");
        input.select_all();
        assert!(input.backspace());
        assert!(input.is_empty());
    }

    #[test]
    fn test_movement_keeps_value() {
        let mut input = TextInput::with_text("old");
        input.select_all();
        input.move_home();
        input.insert('b');
        assert_eq!(input.text(), "bold");
    }

    #[test]
    fn test_empty_value_cannot_be_selected() {
        let mut input = TextInput::new();
        input.select_all();
        assert!(!input.is_selected());
        assert!(!input.backspace());
    }
}
