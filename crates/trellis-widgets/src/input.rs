#![forbid(unsafe_code)]

//! Single-line text input.

use trellis_core::component::{Component, ComponentId, FocusHandler, KeyHandler};
use trellis_core::event::{KeyCode, KeyEvent, PasteEvent};
use trellis_core::geometry::Rect;
use trellis_core::screen::Screen;
use trellis_core::style::Style;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// A focusable line editor.
///
/// Supports the minimal editing surface a leaf needs to exercise the key,
/// focus, and paste capabilities: grapheme-aware cursor movement, insert,
/// backspace/delete, home/end, and paste insertion. The view scrolls
/// horizontally to keep the cursor visible; a cursor cell is drawn in
/// reverse video while focused.
pub struct TextInput {
    id: ComponentId,
    rect: Rect,
    text: String,
    /// Byte offset into `text`, always on a grapheme boundary.
    cursor: usize,
    focused: bool,
    style: Style,
    placeholder: Option<String>,
}

impl TextInput {
    /// Create an empty input.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: ComponentId::next(),
            rect: Rect::default(),
            text: String::new(),
            cursor: 0,
            focused: false,
            style: Style::new(),
            placeholder: None,
        }
    }

    /// Set the base style.
    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Text shown dimmed while the input is empty.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Current contents.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the contents, moving the cursor to the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor]
            .grapheme_indices(true)
            .next_back()
            .map(|(index, _)| index)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.text[self.cursor..]
            .graphemes(true)
            .next()
            .map(|grapheme| self.cursor + grapheme.len())
    }

    fn insert(&mut self, text: &str) {
        self.text.insert_str(self.cursor, text);
        self.cursor += text.len();
    }
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for TextInput {
    fn id(&self) -> ComponentId {
        self.id
    }

    fn draw(&mut self, screen: &mut dyn Screen) {
        if self.rect.is_empty() {
            return;
        }
        let avail = self.rect.width;
        let y = self.rect.y;

        if self.text.is_empty()
            && !self.focused
            && let Some(placeholder) = self.placeholder.clone()
        {
            crate::print_clipped(screen, self.rect.x, y, avail, &placeholder, self.style.dim());
            return;
        }

        // Scroll so the cursor column is always in view (it may sit one
        // column past the text).
        let cursor_col = self.text[..self.cursor].width() as u16;
        let start_col = if cursor_col >= avail {
            cursor_col + 1 - avail
        } else {
            0
        };

        let mut col: u16 = 0;
        for grapheme in self.text.graphemes(true) {
            let width = grapheme.width() as u16;
            if width == 0 {
                continue;
            }
            if col >= start_col && col - start_col + width <= avail
                && let Some(ch) = grapheme.chars().next()
            {
                screen.set_cell(self.rect.x + col - start_col, y, ch, self.style);
            }
            col = col.saturating_add(width);
        }

        if self.focused {
            let x = self.rect.x + cursor_col - start_col;
            let ch = self.text[self.cursor..]
                .graphemes(true)
                .next()
                .and_then(|grapheme| grapheme.chars().next())
                .unwrap_or(' ');
            screen.set_cell(x, y, ch, self.style.reverse());
        }
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    fn focusable(&self) -> bool {
        true
    }

    fn on_paste(&mut self, event: &PasteEvent) -> bool {
        let sanitized: String = event
            .text
            .chars()
            .filter(|ch| *ch != '\r' && *ch != '\n')
            .collect();
        self.insert(&sanitized);
        true
    }

    fn as_key_handler(&mut self) -> Option<&mut dyn KeyHandler> {
        Some(self)
    }

    fn as_focus_handler(&mut self) -> Option<&mut dyn FocusHandler> {
        Some(self)
    }
}

impl KeyHandler for TextInput {
    fn on_key(&mut self, event: &KeyEvent) -> bool {
        if event.ctrl() || event.alt() {
            return false;
        }
        match event.code {
            KeyCode::Char(ch) => {
                let mut buf = [0u8; 4];
                self.insert(ch.encode_utf8(&mut buf));
                true
            }
            KeyCode::Backspace => {
                if let Some(prev) = self.prev_boundary() {
                    self.text.replace_range(prev..self.cursor, "");
                    self.cursor = prev;
                }
                true
            }
            KeyCode::Delete => {
                if let Some(next) = self.next_boundary() {
                    self.text.replace_range(self.cursor..next, "");
                }
                true
            }
            KeyCode::Left => {
                if let Some(prev) = self.prev_boundary() {
                    self.cursor = prev;
                }
                true
            }
            KeyCode::Right => {
                if let Some(next) = self.next_boundary() {
                    self.cursor = next;
                }
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.text.len();
                true
            }
            _ => false,
        }
    }
}

impl FocusHandler for TextInput {
    fn focus(&mut self) {
        self.focused = true;
    }

    fn blur(&mut self) {
        self.focused = false;
    }

    fn has_focus(&self) -> bool {
        self.focused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::style::AttrFlags;
    use trellis_core::test_screen::TestScreen;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code)
    }

    #[test]
    fn typing_inserts_at_cursor() {
        let mut input = TextInput::new();
        assert!(input.on_key(&key(KeyCode::Char('a'))));
        assert!(input.on_key(&key(KeyCode::Char('c'))));
        assert!(input.on_key(&key(KeyCode::Left)));
        assert!(input.on_key(&key(KeyCode::Char('b'))));
        assert_eq!(input.text(), "abc");
    }

    #[test]
    fn backspace_and_delete_remove_graphemes() {
        let mut input = TextInput::new();
        input.set_text("aé你");
        assert!(input.on_key(&key(KeyCode::Backspace)));
        assert_eq!(input.text(), "aé");
        assert!(input.on_key(&key(KeyCode::Home)));
        assert!(input.on_key(&key(KeyCode::Delete)));
        assert_eq!(input.text(), "é");
    }

    #[test]
    fn movement_respects_boundaries() {
        let mut input = TextInput::new();
        input.set_text("é你");
        // End of text; Right stays put.
        assert!(input.on_key(&key(KeyCode::Right)));
        assert_eq!(input.cursor, input.text.len());
        assert!(input.on_key(&key(KeyCode::Left)));
        assert!(input.on_key(&key(KeyCode::Left)));
        assert_eq!(input.cursor, 0);
        assert!(input.on_key(&key(KeyCode::Left)));
        assert_eq!(input.cursor, 0);
    }

    #[test]
    fn control_chords_are_declined() {
        let mut input = TextInput::new();
        let chord = KeyEvent::new(KeyCode::Char('c'))
            .with_modifiers(trellis_core::event::Modifiers::CTRL);
        assert!(!input.on_key(&chord));
        assert!(input.text().is_empty());
    }

    #[test]
    fn paste_inserts_without_newlines() {
        let mut input = TextInput::new();
        input.set_text("ab");
        input.on_key(&key(KeyCode::Left));
        assert!(input.on_paste(&PasteEvent::new("x\ny\r")));
        assert_eq!(input.text(), "axyb");
    }

    #[test]
    fn focus_notifications_toggle_state() {
        let mut input = TextInput::new();
        assert!(!input.has_focus());
        input.focus();
        assert!(input.has_focus());
        input.blur();
        assert!(!input.has_focus());
    }

    #[test]
    fn draw_shows_reverse_cursor_when_focused() {
        let mut screen = TestScreen::new(10, 1);
        let mut input = TextInput::new();
        input.set_text("ab");
        input.set_rect(Rect::new(0, 0, 10, 1));
        input.focus();
        input.draw(&mut screen);

        // Cursor sits one past the text, drawn as a reversed blank.
        let style = screen.style_at(2, 0).unwrap();
        assert!(style.attrs.contains(AttrFlags::REVERSE));
        assert!(!screen.style_at(0, 0).unwrap().attrs.contains(AttrFlags::REVERSE));
    }

    #[test]
    fn long_text_scrolls_to_keep_cursor_visible() {
        let mut screen = TestScreen::new(5, 1);
        let mut input = TextInput::new();
        input.set_text("abcdefgh");
        input.set_rect(Rect::new(0, 0, 5, 1));
        input.focus();
        input.draw(&mut screen);

        // Cursor col 8, avail 5 -> start col 4: "efgh" plus cursor cell.
        assert_eq!(screen.char_at(0, 0), Some('e'));
        assert_eq!(screen.char_at(3, 0), Some('h'));
        assert!(screen.style_at(4, 0).unwrap().attrs.contains(AttrFlags::REVERSE));
    }

    #[test]
    fn placeholder_shown_while_empty_and_unfocused() {
        let mut screen = TestScreen::new(6, 1);
        let mut input = TextInput::new().with_placeholder("name");
        input.set_rect(Rect::new(0, 0, 6, 1));
        input.draw(&mut screen);
        assert_eq!(screen.row_text(0), "name  ");
        assert!(screen.style_at(0, 0).unwrap().attrs.contains(AttrFlags::DIM));
    }
}
