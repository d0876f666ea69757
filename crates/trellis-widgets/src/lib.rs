#![forbid(unsafe_code)]

//! Leaf widgets and wrappers for the Trellis component tree.
//!
//! Everything here is an ordinary [`Component`](trellis_core::Component):
//!
//! - [`Panel`] - bordered single-child wrapper with an optional title and
//!   an input-capture hook for modal use
//! - [`Label`] - static text, with `[fg:bg]` inline markup
//! - [`TextInput`] - a minimal focusable line editor
//!
//! The [`markup`] module implements the inline style mini-language the text
//! widgets consume.

pub mod input;
pub mod label;
pub mod markup;
pub mod panel;

pub use input::TextInput;
pub use label::Label;
pub use panel::Panel;

use trellis_core::screen::Screen;
use trellis_core::style::Style;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Print `text` at `(x, y)`, clipped to `max_width` columns. Returns the
/// number of columns used.
///
/// Widgets draw only inside their assigned rectangle; this is the clipping
/// [`Screen::print`] deliberately does not do.
pub(crate) fn print_clipped(
    screen: &mut dyn Screen,
    x: u16,
    y: u16,
    max_width: u16,
    text: &str,
    style: Style,
) -> u16 {
    let mut used: u16 = 0;
    for grapheme in text.graphemes(true) {
        let width = grapheme.width() as u16;
        if width == 0 {
            continue;
        }
        if used.saturating_add(width) > max_width {
            break;
        }
        if let Some(ch) = grapheme.chars().next() {
            screen.set_cell(x + used, y, ch, style);
        }
        used += width;
    }
    used
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::test_screen::TestScreen;

    #[test]
    fn print_clipped_stops_at_limit() {
        let mut screen = TestScreen::new(10, 1);
        let used = print_clipped(&mut screen, 0, 0, 3, "abcdef", Style::new());
        assert_eq!(used, 3);
        assert_eq!(screen.row_text(0), "abc       ");
    }

    #[test]
    fn print_clipped_never_splits_wide_graphemes() {
        let mut screen = TestScreen::new(10, 1);
        // "你" is two columns; with only one left it must not be drawn.
        let used = print_clipped(&mut screen, 0, 0, 3, "ab你", Style::new());
        assert_eq!(used, 2);
        assert_eq!(screen.char_at(2, 0), Some(' '));
    }
}
