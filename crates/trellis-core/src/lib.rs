#![forbid(unsafe_code)]

//! Core contracts for the Trellis component-tree runtime.
//!
//! This crate defines what the rest of the workspace builds on: geometry
//! ([`Rect`]), canonical input events ([`Event`]), cell styles ([`Style`]),
//! the [`Component`] capability model every tree node satisfies, and the
//! [`Screen`] contract the runtime draws through. The crossterm-backed
//! [`TerminalScreen`] lives here too, so backend types never escape this
//! crate.

pub mod component;
pub mod event;
pub mod geometry;
pub mod logging;
pub mod screen;
pub mod style;
pub mod terminal;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_screen;

pub use component::{Component, ComponentId, FocusHandler, KeyHandler, MouseHandler};
pub use event::{
    Event, KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind, PasteEvent,
};
pub use geometry::Rect;
pub use screen::Screen;
pub use style::{AttrFlags, Color, Style};
pub use terminal::{ScreenOptions, TerminalScreen};
#[cfg(any(test, feature = "test-helpers"))]
pub use test_screen::TestScreen;
