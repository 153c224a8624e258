//! Message input editor
//!
//! Single-line buffer with a cursor. Submission and cancel decisions are
//! returned to the caller as an [`InputAction`].

use crossterm::event::{KeyCode, KeyModifiers};

/// Longest message the editor accepts, in characters
pub const MAX_INPUT_CHARS: usize = 4000;

/// Result of handling a key in the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// Key was consumed, keep editing
    Continue,
    /// Enter pressed with this text
    Submit(String),
    /// Esc pressed
    Cancel,
    /// Key not handled by the editor
    Ignored,
}

#[derive(Debug, Default)]
pub struct InputEditor {
    buffer: String,
    /// Cursor position in characters
    cursor: usize,
}

impl InputEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Take the current text, leaving the editor empty
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.buffer)
    }

    /// Handle a key event while the input has focus
    ///
    /// `Enter` hands the text back without clearing it, so the caller can
    /// keep it when the submission is refused.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> InputAction {
        match code {
            KeyCode::Enter => InputAction::Submit(self.buffer.clone()),
            KeyCode::Esc => InputAction::Cancel,
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index(self.cursor);
                    self.buffer.remove(at);
                }
                InputAction::Continue
            }
            KeyCode::Delete => {
                if self.cursor < self.char_count() {
                    let at = self.byte_index(self.cursor);
                    self.buffer.remove(at);
                }
                InputAction::Continue
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                InputAction::Continue
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.char_count());
                InputAction::Continue
            }
            KeyCode::Home => {
                self.cursor = 0;
                InputAction::Continue
            }
            KeyCode::End => {
                self.cursor = self.char_count();
                InputAction::Continue
            }
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                if self.char_count() < MAX_INPUT_CHARS {
                    let at = self.byte_index(self.cursor);
                    self.buffer.insert(at, c);
                    self.cursor += 1;
                }
                InputAction::Continue
            }
            _ => InputAction::Ignored,
        }
    }

    fn char_count(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(editor: &mut InputEditor, text: &str) {
        for c in text.chars() {
            editor.handle_key(KeyCode::Char(c), KeyModifiers::empty());
        }
    }

    #[test]
    fn test_typing_and_submit() {
        let mut editor = InputEditor::new();
        type_str(&mut editor, "Hi");
        assert_eq!(
            editor.handle_key(KeyCode::Enter, KeyModifiers::empty()),
            InputAction::Submit("Hi".to_string())
        );
        // Enter does not clear; the caller decides
        assert_eq!(editor.text(), "Hi");
    }

    #[test]
    fn test_backspace() {
        let mut editor = InputEditor::new();
        type_str(&mut editor, "Test");
        editor.handle_key(KeyCode::Backspace, KeyModifiers::empty());
        assert_eq!(editor.text(), "Tes");
    }

    #[test]
    fn test_cursor_editing_with_multibyte() {
        let mut editor = InputEditor::new();
        type_str(&mut editor, "héllo");
        editor.handle_key(KeyCode::Home, KeyModifiers::empty());
        editor.handle_key(KeyCode::Right, KeyModifiers::empty());
        editor.handle_key(KeyCode::Delete, KeyModifiers::empty());
        assert_eq!(editor.text(), "hllo");
        type_str(&mut editor, "é");
        assert_eq!(editor.text(), "héllo");
        assert_eq!(editor.cursor(), 2);
    }

    #[test]
    fn test_control_chars_are_ignored() {
        let mut editor = InputEditor::new();
        assert_eq!(
            editor.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL),
            InputAction::Ignored
        );
        assert!(editor.is_empty());
    }

    #[test]
    fn test_take_clears() {
        let mut editor = InputEditor::new();
        type_str(&mut editor, "abc");
        assert_eq!(editor.take(), "abc");
        assert!(editor.is_empty());
        assert_eq!(editor.cursor(), 0);
    }

    #[test]
    fn test_escape_cancels() {
        let mut editor = InputEditor::new();
        assert_eq!(
            editor.handle_key(KeyCode::Esc, KeyModifiers::empty()),
            InputAction::Cancel
        );
    }
}
