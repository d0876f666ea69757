#![forbid(unsafe_code)]

//! The component capability model.
//!
//! Every node in the UI tree satisfies [`Component`]: it can draw itself
//! into its assigned rectangle, report and accept geometry, say whether it
//! takes keyboard focus, and structurally accept paste events. Optional
//! behaviors - key handling, mouse handling, focus notifications - are
//! separate traits reached through capability queries (`as_key_handler` and
//! friends) rather than a deeper trait hierarchy, so dispatch can ask "does
//! this node handle keys?" at runtime without knowing its concrete type.
//!
//! Ownership in the tree is strictly acyclic: a container exclusively owns
//! its children (`Box<dyn Component>`) and exposes them positionally via
//! `child_at`. There are no parent pointers; all routing re-walks the tree
//! from the root. A [`ComponentId`] is the stable identity used for focus
//! and routing across those walks.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::event::{KeyEvent, MouseEvent, PasteEvent};
use crate::geometry::Rect;
use crate::screen::Screen;

/// Stable identity of a component, independent of its position in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(u64);

impl ComponentId {
    /// Allocate a fresh, process-unique id.
    #[must_use]
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// The contract every tree node satisfies.
pub trait Component {
    /// Stable identity of this node.
    fn id(&self) -> ComponentId;

    /// Render within the last-assigned rectangle.
    ///
    /// Must not mutate tree structure or the node's own rectangle; drawing
    /// with a zero-area rectangle is valid and paints nothing.
    fn draw(&mut self, screen: &mut dyn Screen);

    /// The last-assigned rectangle.
    fn rect(&self) -> Rect;

    /// Assign geometry. The only way geometry enters the tree: containers
    /// call this on every child whenever their own rectangle or child list
    /// changes.
    fn set_rect(&mut self, rect: Rect);

    /// Whether this node participates in the focus chain. Must be
    /// side-effect-free; queried on every chain rebuild.
    fn focusable(&self) -> bool {
        false
    }

    /// Offer pasted text. Returns `true` if consumed.
    ///
    /// Part of the universal contract (not a capability): every component
    /// accepts paste events structurally, even if only to decline them.
    fn on_paste(&mut self, event: &PasteEvent) -> bool {
        let _ = event;
        false
    }

    /// Number of children, for top-down tree walks.
    fn child_count(&self) -> usize {
        0
    }

    /// Child at `index`, in declaration (= draw) order.
    fn child_at(&self, index: usize) -> Option<&dyn Component> {
        let _ = index;
        None
    }

    /// Mutable child at `index`.
    fn child_at_mut(&mut self, index: usize) -> Option<&mut dyn Component> {
        let _ = index;
        None
    }

    /// Whether this node wants first refusal of input events traveling to a
    /// descendant (a modal wrapper, typically). Capture-enabled ancestors
    /// are offered the event root-first, before the focused leaf sees it.
    fn captures_input(&self) -> bool {
        false
    }

    /// Key-handling capability, if this node has one.
    fn as_key_handler(&mut self) -> Option<&mut dyn KeyHandler> {
        None
    }

    /// Mouse-handling capability, if this node has one.
    fn as_mouse_handler(&mut self) -> Option<&mut dyn MouseHandler> {
        None
    }

    /// Focus-notification capability, if this node has one.
    fn as_focus_handler(&mut self) -> Option<&mut dyn FocusHandler> {
        None
    }
}

/// Capability: reacts to key events.
pub trait KeyHandler {
    /// Offer a key event. Returns `true` if consumed, stopping propagation.
    fn on_key(&mut self, event: &KeyEvent) -> bool;
}

/// Capability: reacts to mouse events.
pub trait MouseHandler {
    /// Offer a mouse event with coordinates in this component's local
    /// space. Returns `true` if consumed.
    fn on_mouse(&mut self, event: &MouseEvent) -> bool;
}

/// Capability: receives focus notifications.
///
/// `focus`/`blur` are notifications, not requests - the Application is the
/// sole authority on focus transfer and the only caller of these.
pub trait FocusHandler {
    /// Notified when this component becomes the focus holder.
    fn focus(&mut self);

    /// Notified when this component loses focus.
    fn blur(&mut self);

    /// Whether this component currently believes it holds focus.
    fn has_focus(&self) -> bool;
}
