//! Single-line search field.

/// Editable text with a cursor counted in characters.
#[derive(Clone, Debug, Default)]
pub struct SearchInput {
    content: String,
    cursor: usize,
}

impl SearchInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Byte offset of the character at `cursor`.
    fn byte_offset(&self) -> usize {
        self.content
            .char_indices()
            .nth(self.cursor)
            .map_or(self.content.len(), |(i, _)| i)
    }

    fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    /// Inserts a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset();
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// Deletes the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_offset();
            self.content.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    /// Empties the field.
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Text before and after the cursor.
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.content.split_at(self.byte_offset())
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_at_cursor_with_multibyte_chars() {
        let mut input = SearchInput::new();
        for c in "M&M".chars() {
            input.insert(c);
        }
        input.move_left();
        input.insert('é');
        assert_eq!(input.as_str(), "M&éM");
        assert_eq!(input.split_at_cursor(), ("M&é", "M"));
        input.backspace();
        assert_eq!(input.as_str(), "M&M");
        input.move_right();
        input.move_right();
        assert_eq!(input.cursor(), 3);
        input.clear();
        assert!(input.is_empty());
    }
}
