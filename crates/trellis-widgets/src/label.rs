#![forbid(unsafe_code)]

//! Static text widget.

use trellis_core::component::{Component, ComponentId};
use trellis_core::geometry::Rect;
use trellis_core::screen::Screen;
use trellis_core::style::Style;

use crate::markup;
use crate::print_clipped;

/// A non-focusable text leaf.
///
/// Text may contain `[fg:bg]` inline markup (see [`markup`]); lines beyond
/// the assigned height and columns beyond the assigned width are clipped.
pub struct Label {
    id: ComponentId,
    rect: Rect,
    text: String,
    style: Style,
}

impl Label {
    /// Create a label.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: ComponentId::next(),
            rect: Rect::default(),
            text: text.into(),
            style: Style::new(),
        }
    }

    /// Set the base style markup resets to.
    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Replace the text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// The current text, markup included.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Component for Label {
    fn id(&self) -> ComponentId {
        self.id
    }

    fn draw(&mut self, screen: &mut dyn Screen) {
        if self.rect.is_empty() {
            return;
        }
        for (row, line) in self.text.lines().take(self.rect.height as usize).enumerate() {
            let y = self.rect.y + row as u16;
            let mut x = self.rect.x;
            let mut remaining = self.rect.width;
            for span in markup::parse_spans(line, self.style) {
                let used = print_clipped(screen, x, y, remaining, &span.text, span.style);
                x += used;
                remaining -= used;
                if remaining == 0 {
                    break;
                }
            }
        }
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::style::Color;
    use trellis_core::test_screen::TestScreen;

    #[test]
    fn draws_lines_clipped_to_rect() {
        let mut screen = TestScreen::new(8, 2);
        let mut label = Label::new("hello world\nsecond\nthird");
        label.set_rect(Rect::new(0, 0, 5, 2));
        label.draw(&mut screen);

        assert_eq!(screen.row_text(0), "hello   ");
        assert_eq!(screen.row_text(1), "secon   ");
    }

    #[test]
    fn markup_changes_style_mid_line() {
        let mut screen = TestScreen::new(8, 1);
        let mut label = Label::new("a[red]b");
        label.set_rect(Rect::new(0, 0, 8, 1));
        label.draw(&mut screen);

        assert_eq!(screen.char_at(0, 0), Some('a'));
        assert_eq!(screen.char_at(1, 0), Some('b'));
        assert_eq!(screen.style_at(0, 0).unwrap().fg, Color::Reset);
        assert_eq!(screen.style_at(1, 0).unwrap().fg, Color::Red);
    }

    #[test]
    fn zero_area_draws_nothing() {
        let mut screen = TestScreen::new(4, 1);
        let mut label = Label::new("text");
        label.set_rect(Rect::new(0, 0, 0, 0));
        label.draw(&mut screen);
        assert_eq!(screen.row_text(0), "    ");
    }

    #[test]
    fn not_focusable() {
        let label = Label::new("x");
        assert!(!label.focusable());
    }
}
