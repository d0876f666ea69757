#![forbid(unsafe_code)]

//! Trellis public facade crate.
//!
//! Re-exports the common types from the workspace crates and offers a
//! lightweight prelude. A minimal application:
//!
//! ```no_run
//! use trellis::prelude::*;
//!
//! let mut app = Application::new(TerminalScreen::new());
//! app.set_root(
//!     Flex::vertical()
//!         .with(Label::new("[yellow]hello[-:-] world"), SizeMode::Fixed(1))
//!         .with(TextInput::new(), SizeMode::Fixed(1)),
//! );
//! app.start()?;
//! # Ok::<(), trellis::Error>(())
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use trellis_core::component::{Component, ComponentId, FocusHandler, KeyHandler, MouseHandler};
pub use trellis_core::event::{
    Event, KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind, PasteEvent,
};
pub use trellis_core::geometry::Rect;
pub use trellis_core::screen::Screen;
pub use trellis_core::style::{AttrFlags, Color, Style};
pub use trellis_core::terminal::{ScreenOptions, TerminalScreen};

// --- Layout re-exports -----------------------------------------------------

pub use trellis_layout::{Center, Direction, Flex, Grid, GridError, SizeMode};

// --- Widget re-exports -----------------------------------------------------

pub use trellis_widgets::{Label, Panel, TextInput};

// --- Runtime re-exports ----------------------------------------------------

pub use trellis_runtime::{AppHandle, Application, FocusChain, RuntimeError};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Trellis apps.
#[derive(Debug)]
pub enum Error {
    /// I/O failure during terminal operations.
    Io(std::io::Error),
    /// Application lifecycle error.
    Runtime(RuntimeError),
    /// Invalid layout configuration.
    Layout(GridError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Runtime(err) => write!(f, "{err}"),
            Self::Layout(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<RuntimeError> for Error {
    fn from(err: RuntimeError) -> Self {
        Self::Runtime(err)
    }
}

impl From<GridError> for Error {
    fn from(err: GridError) -> Self {
        Self::Layout(err)
    }
}

/// Standard result type for Trellis APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    //! Day-to-day imports.

    pub use crate::{
        AppHandle, Application, Center, Color, Component, ComponentId, Error, Event, Flex, Grid,
        KeyCode, KeyEvent, Label, Panel, Rect, Result, Screen, SizeMode, Style, TerminalScreen,
        TextInput,
    };

    pub use crate::{core, layout, runtime, widgets};
}

pub use trellis_core as core;
pub use trellis_layout as layout;
pub use trellis_runtime as runtime;
pub use trellis_widgets as widgets;
