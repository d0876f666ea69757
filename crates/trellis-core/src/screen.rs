#![forbid(unsafe_code)]

//! The Screen contract.
//!
//! A [`Screen`] is the cell-grid draw surface plus the event source: the
//! runtime treats it purely as an interface, so any backend satisfying it is
//! interchangeable. [`crate::terminal::TerminalScreen`] is the crossterm
//! backend; a scriptable headless implementation lives behind the
//! `test-helpers` feature.

use std::io;
use std::time::Duration;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::event::Event;
use crate::style::Style;

/// Cell-grid draw surface and blocking event source.
pub trait Screen {
    /// Current size as `(width, height)` in cells.
    fn size(&self) -> (u16, u16);

    /// Write one character at an absolute position. Out-of-bounds writes
    /// are ignored.
    fn set_cell(&mut self, x: u16, y: u16, ch: char, style: Style);

    /// Reset every cell to the default style and a blank character.
    fn clear(&mut self);

    /// Flush drawn cells to the output device.
    fn show(&mut self) -> io::Result<()>;

    /// Repaint everything from scratch (e.g. after external corruption).
    fn sync(&mut self) -> io::Result<()>;

    /// Acquire the device: enter raw mode, configure terminal modes,
    /// allocate the grid. Called once by the Application before the first
    /// draw; an error here aborts startup with nothing left running.
    fn init(&mut self) -> io::Result<()>;

    /// Release the device, restoring every mode `init` changed. Idempotent.
    fn fini(&mut self);

    /// Wait up to `timeout` for the next input event.
    ///
    /// Returns `Ok(None)` when the timeout elapses without input. The
    /// bounded wait is what lets stop and redraw signals from other threads
    /// be observed promptly by the dispatch loop.
    fn poll_event(&mut self, timeout: Duration) -> io::Result<Option<Event>>;

    /// Write a string starting at `(x, y)`, advancing by display width.
    ///
    /// Wide graphemes occupy two cells (the continuation cell is skipped);
    /// multi-scalar graphemes are drawn by their first scalar. Returns the
    /// number of columns advanced.
    fn print(&mut self, x: u16, y: u16, text: &str, style: Style) -> u16 {
        let mut col = x;
        for grapheme in text.graphemes(true) {
            let width = grapheme.width() as u16;
            if width == 0 {
                continue;
            }
            if let Some(ch) = grapheme.chars().next() {
                self.set_cell(col, y, ch, style);
            }
            col = col.saturating_add(width);
        }
        col - x
    }

    /// Fill a rectangular region with one character.
    fn fill(&mut self, x: u16, y: u16, width: u16, height: u16, ch: char, style: Style) {
        for row in y..y.saturating_add(height) {
            for col in x..x.saturating_add(width) {
                self.set_cell(col, row, ch, style);
            }
        }
    }
}
