#![forbid(unsafe_code)]

//! Crossterm-backed [`Screen`] implementation.
//!
//! Terminal state is treated as a session: every mode `init` enables is
//! tracked by a flag and restored in reverse order by `fini`, which is
//! idempotent and also runs from `Drop` so the terminal is recovered on
//! panic as well as on every normal exit path.
//!
//! Cells accumulate in an in-memory grid; [`Screen::show`] flushes rows
//! that changed since the previous flush, [`Screen::sync`] erases the
//! terminal and repaints everything.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::event as cte;
use crossterm::style as cts;
use crossterm::{cursor, queue, terminal};

use crate::event::Event;
use crate::screen::Screen;
use crate::style::{AttrFlags, Style};

/// Terminal modes to enable for the session.
#[derive(Debug, Clone)]
pub struct ScreenOptions {
    /// Switch to the alternate screen buffer, preserving scrollback.
    pub alternate_screen: bool,
    /// Report mouse events.
    pub mouse_capture: bool,
    /// Receive pasted text as single events instead of keystrokes.
    pub bracketed_paste: bool,
}

impl Default for ScreenOptions {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            mouse_capture: false,
            bracketed_paste: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    style: Style,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: Style::new(),
        }
    }
}

/// Crossterm-backed cell-grid screen.
pub struct TerminalScreen {
    out: Stdout,
    options: ScreenOptions,
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    dirty_rows: Vec<bool>,
    raw_mode: bool,
    alt_screen: bool,
    mouse: bool,
    paste: bool,
    cursor_hidden: bool,
    active: bool,
}

impl TerminalScreen {
    /// Create a screen with default options. No terminal state is touched
    /// until [`Screen::init`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(ScreenOptions::default())
    }

    /// Create a screen with explicit options.
    #[must_use]
    pub fn with_options(options: ScreenOptions) -> Self {
        Self {
            out: io::stdout(),
            options,
            width: 0,
            height: 0,
            cells: Vec::new(),
            dirty_rows: Vec::new(),
            raw_mode: false,
            alt_screen: false,
            mouse: false,
            paste: false,
            cursor_hidden: false,
            active: false,
        }
    }

    /// Enable mouse capture for this session.
    #[must_use]
    pub fn with_mouse(mut self) -> Self {
        self.options.mouse_capture = true;
        self
    }

    fn resize_grid(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells = vec![Cell::default(); width as usize * height as usize];
        self.dirty_rows = vec![true; height as usize];
    }

    fn try_init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.raw_mode = true;
        if self.options.alternate_screen {
            queue!(self.out, terminal::EnterAlternateScreen)?;
            self.alt_screen = true;
        }
        if self.options.mouse_capture {
            queue!(self.out, cte::EnableMouseCapture)?;
            self.mouse = true;
        }
        if self.options.bracketed_paste {
            queue!(self.out, cte::EnableBracketedPaste)?;
            self.paste = true;
        }
        queue!(self.out, cursor::Hide)?;
        self.cursor_hidden = true;
        queue!(self.out, terminal::Clear(terminal::ClearType::All))?;
        self.out.flush()?;

        let (width, height) = terminal::size()?;
        self.resize_grid(width, height);
        self.active = true;
        crate::debug!(width, height, "terminal session initialized");
        Ok(())
    }

    fn queue_style(&mut self, style: Style) -> io::Result<()> {
        queue!(
            self.out,
            cts::SetAttribute(cts::Attribute::Reset),
            cts::SetForegroundColor(style.fg.to_crossterm()),
            cts::SetBackgroundColor(style.bg.to_crossterm()),
        )?;
        let pairs = [
            (AttrFlags::BOLD, cts::Attribute::Bold),
            (AttrFlags::DIM, cts::Attribute::Dim),
            (AttrFlags::ITALIC, cts::Attribute::Italic),
            (AttrFlags::UNDERLINE, cts::Attribute::Underlined),
            (AttrFlags::REVERSE, cts::Attribute::Reverse),
            (AttrFlags::STRIKETHROUGH, cts::Attribute::CrossedOut),
        ];
        for (flag, attr) in pairs {
            if style.attrs.contains(flag) {
                queue!(self.out, cts::SetAttribute(attr))?;
            }
        }
        Ok(())
    }

    fn flush_row(&mut self, row: u16) -> io::Result<()> {
        queue!(self.out, cursor::MoveTo(0, row))?;
        let mut last_style: Option<Style> = None;
        for col in 0..self.width {
            let cell = self.cells[row as usize * self.width as usize + col as usize];
            if last_style != Some(cell.style) {
                self.queue_style(cell.style)?;
                last_style = Some(cell.style);
            }
            queue!(self.out, cts::Print(cell.ch))?;
        }
        Ok(())
    }
}

impl Default for TerminalScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for TerminalScreen {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn set_cell(&mut self, x: u16, y: u16, ch: char, style: Style) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y as usize * self.width as usize + x as usize;
        let cell = Cell { ch, style };
        if self.cells[index] != cell {
            self.cells[index] = cell;
            self.dirty_rows[y as usize] = true;
        }
    }

    fn clear(&mut self) {
        for (index, cell) in self.cells.iter_mut().enumerate() {
            if *cell != Cell::default() {
                *cell = Cell::default();
                self.dirty_rows[index / self.width.max(1) as usize] = true;
            }
        }
    }

    fn show(&mut self) -> io::Result<()> {
        for row in 0..self.height {
            if self.dirty_rows[row as usize] {
                self.flush_row(row)?;
                self.dirty_rows[row as usize] = false;
            }
        }
        queue!(self.out, cts::SetAttribute(cts::Attribute::Reset))?;
        self.out.flush()
    }

    fn sync(&mut self) -> io::Result<()> {
        queue!(self.out, terminal::Clear(terminal::ClearType::All))?;
        for dirty in &mut self.dirty_rows {
            *dirty = true;
        }
        self.show()
    }

    fn init(&mut self) -> io::Result<()> {
        if let Err(err) = self.try_init() {
            // Roll back whatever was enabled before the failure.
            self.fini();
            return Err(err);
        }
        Ok(())
    }

    fn fini(&mut self) {
        if !self.raw_mode && !self.active {
            return;
        }
        // Restore in reverse order of enabling; best-effort on teardown.
        if self.cursor_hidden {
            let _ = queue!(self.out, cursor::Show);
            self.cursor_hidden = false;
        }
        if self.paste {
            let _ = queue!(self.out, cte::DisableBracketedPaste);
            self.paste = false;
        }
        if self.mouse {
            let _ = queue!(self.out, cte::DisableMouseCapture);
            self.mouse = false;
        }
        if self.alt_screen {
            let _ = queue!(self.out, terminal::LeaveAlternateScreen);
            self.alt_screen = false;
        }
        let _ = self.out.flush();
        if self.raw_mode {
            let _ = terminal::disable_raw_mode();
            self.raw_mode = false;
        }
        self.active = false;
        crate::debug!("terminal session restored");
    }

    fn poll_event(&mut self, timeout: Duration) -> io::Result<Option<Event>> {
        if !cte::poll(timeout)? {
            return Ok(None);
        }
        let raw = cte::read()?;
        if let cte::Event::Resize(width, height) = raw {
            self.resize_grid(width, height);
        }
        Ok(Event::from_crossterm(raw))
    }
}

impl Drop for TerminalScreen {
    fn drop(&mut self) {
        self.fini();
    }
}
