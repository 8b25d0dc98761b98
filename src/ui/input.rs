//! Single-line text input widget.

use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Editable one-line field with cursor movement.
pub struct TextInput {
    value: String,
    /// Cursor position counted in chars, mapped to a byte index on edit
    cursor: usize,
    placeholder: String,
}

impl TextInput {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            placeholder: placeholder.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor)
            .unwrap_or(self.value.len())
    }

    /// Handle a key event, returns true if the key was consumed
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char(c) => {
                let at = self.byte_index();
                self.value.insert(at, c);
                self.cursor += 1;
                true
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index();
                    self.value.remove(at);
                }
                true
            }
            KeyCode::Delete => {
                if self.cursor < self.char_count() {
                    let at = self.byte_index();
                    self.value.remove(at);
                }
                true
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            KeyCode::Right => {
                if self.cursor < self.char_count() {
                    self.cursor += 1;
                }
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.char_count();
                true
            }
            _ => false,
        }
    }

    /// Render the field
    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let content = if self.value.is_empty() && !focused {
            Line::from(Span::styled(
                self.placeholder.as_str(),
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            let mut text = self.value.clone();
            if focused {
                // Show cursor position
                text.insert(self.byte_index(), '|');
            }
            Line::from(text)
        };

        let para = Paragraph::new(content).style(Style::default().fg(if focused {
            Color::White
        } else {
            Color::Gray
        }));
        frame.render_widget(para, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_chars() {
        let mut input = TextInput::new("seed");
        assert!(input.handle_key(KeyCode::Char('h')));
        assert!(input.handle_key(KeyCode::Char('i')));
        assert_eq!(input.value(), "hi");
    }

    #[test]
    fn test_backspace_mid_word() {
        let mut input = TextInput::new("");
        for c in "seo".chars() {
            input.handle_key(KeyCode::Char(c));
        }
        input.handle_key(KeyCode::Left);
        input.handle_key(KeyCode::Backspace);
        assert_eq!(input.value(), "so");
    }

    #[test]
    fn test_cursor_stays_on_char_boundaries() {
        let mut input = TextInput::new("");
        for c in "café".chars() {
            input.handle_key(KeyCode::Char(c));
        }
        input.handle_key(KeyCode::Left);
        input.handle_key(KeyCode::Char('s'));
        assert_eq!(input.value(), "cafsé");
    }

    #[test]
    fn test_home_end_and_delete() {
        let mut input = TextInput::new("");
        for c in "abc".chars() {
            input.handle_key(KeyCode::Char(c));
        }
        input.handle_key(KeyCode::Home);
        input.handle_key(KeyCode::Delete);
        assert_eq!(input.value(), "bc");
        input.handle_key(KeyCode::End);
        input.handle_key(KeyCode::Backspace);
        assert_eq!(input.value(), "b");
    }

    #[test]
    fn test_blank_detection_and_clear() {
        let mut input = TextInput::new("");
        assert!(input.is_blank());
        input.handle_key(KeyCode::Char(' '));
        assert!(input.is_blank());
        input.handle_key(KeyCode::Char('x'));
        assert!(!input.is_blank());
        input.clear();
        assert!(input.is_blank());
        assert_eq!(input.value(), "");
    }
}
