#![forbid(unsafe_code)]

//! The Trellis application runtime.
//!
//! [`Application`] owns the component tree and the dispatch loop: it pulls
//! events from a [`Screen`](trellis_core::Screen), routes them to the
//! focused or hit-tested component (capture, target, bubble), maintains the
//! Tab-order focus chain, and coalesces redraw requests into single draw
//! passes. [`AppHandle`] is the thread-safe surface other threads use to
//! request redraws or stop the loop.

mod application;
mod dispatch;
mod focus;
#[cfg(test)]
pub(crate) mod test_support;

pub use application::{AppHandle, Application, RuntimeError};
pub use focus::FocusChain;
