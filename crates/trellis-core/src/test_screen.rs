#![forbid(unsafe_code)]

//! Scriptable headless [`Screen`] for tests.
//!
//! Holds a fixed-size in-memory grid, a queue of scripted events, and
//! counters for the operations tests assert on (draw passes are counted by
//! `show`). `poll_event` never touches a terminal: it pops the script, and
//! once the script is exhausted it sleeps out the timeout and reports "no
//! input", which lets loop-level tests exercise stop/redraw signaling from
//! other threads.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crate::event::Event;
use crate::screen::Screen;
use crate::style::Style;

/// In-memory screen with a scripted event queue.
pub struct TestScreen {
    width: u16,
    height: u16,
    cells: Vec<(char, Style)>,
    events: VecDeque<Event>,
    /// Number of completed `show` calls (= draw passes flushed).
    pub shows: usize,
    /// Number of `sync` calls.
    pub syncs: usize,
    /// Number of `clear` calls.
    pub clears: usize,
    /// Whether `init` has run.
    pub inited: bool,
    /// Number of `fini` calls that found the screen active.
    pub finis: usize,
}

impl TestScreen {
    /// Create a screen of the given size with an empty script.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![(' ', Style::new()); width as usize * height as usize],
            events: VecDeque::new(),
            shows: 0,
            syncs: 0,
            clears: 0,
            inited: false,
            finis: 0,
        }
    }

    /// Append an event to the script.
    pub fn push_event(&mut self, event: Event) {
        self.events.push_back(event);
    }

    /// Append several events to the script.
    pub fn push_events(&mut self, events: impl IntoIterator<Item = Event>) {
        self.events.extend(events);
    }

    /// Character at `(x, y)`, or `None` out of bounds.
    #[must_use]
    pub fn char_at(&self, x: u16, y: u16) -> Option<char> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[y as usize * self.width as usize + x as usize].0)
    }

    /// Style at `(x, y)`, or `None` out of bounds.
    #[must_use]
    pub fn style_at(&self, x: u16, y: u16) -> Option<Style> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[y as usize * self.width as usize + x as usize].1)
    }

    /// The contents of row `y` as a string (trailing blanks included).
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.char_at(x, y))
            .collect()
    }
}

impl Screen for TestScreen {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn set_cell(&mut self, x: u16, y: u16, ch: char, style: Style) {
        if x >= self.width || y >= self.height {
            return;
        }
        self.cells[y as usize * self.width as usize + x as usize] = (ch, style);
    }

    fn clear(&mut self) {
        self.clears += 1;
        for cell in &mut self.cells {
            *cell = (' ', Style::new());
        }
    }

    fn show(&mut self) -> io::Result<()> {
        self.shows += 1;
        Ok(())
    }

    fn sync(&mut self) -> io::Result<()> {
        self.syncs += 1;
        self.show()
    }

    fn init(&mut self) -> io::Result<()> {
        self.inited = true;
        Ok(())
    }

    fn fini(&mut self) {
        if self.inited {
            self.finis += 1;
            self.inited = false;
        }
    }

    fn poll_event(&mut self, timeout: Duration) -> io::Result<Option<Event>> {
        if let Some(event) = self.events.pop_front() {
            return Ok(Some(event));
        }
        // Script exhausted: behave like a quiet terminal.
        std::thread::sleep(timeout.min(Duration::from_millis(2)));
        Ok(None)
    }
}
