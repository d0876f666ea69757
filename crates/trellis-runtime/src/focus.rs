#![forbid(unsafe_code)]

//! The focus chain.
//!
//! An ordered list of the focusable components currently reachable from the
//! root, derived by pre-order traversal, plus a cursor. The chain is never
//! patched incrementally: callers rebuild it from the live tree whenever
//! structure may have changed, which makes staleness impossible by
//! construction.

use trellis_core::component::{Component, ComponentId};

/// Ordered focusable components plus a cursor.
#[derive(Debug, Default)]
pub struct FocusChain {
    order: Vec<ComponentId>,
    cursor: Option<usize>,
}

impl FocusChain {
    /// An empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from the tree by full pre-order traversal.
    ///
    /// `focused` is the id the application currently considers focused; the
    /// cursor lands on it if it is still present and focusable, and resets
    /// to none otherwise.
    pub fn rebuild(&mut self, root: Option<&dyn Component>, focused: Option<ComponentId>) {
        self.order.clear();
        if let Some(root) = root {
            collect_focusable(root, &mut self.order);
        }
        self.cursor = focused.and_then(|id| self.order.iter().position(|entry| *entry == id));
    }

    /// Number of focusable components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the chain is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The id under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<ComponentId> {
        self.cursor.map(|index| self.order[index])
    }

    /// Advance the cursor with wraparound and return the new holder.
    /// With no cursor yet, starts at the first entry.
    pub fn next(&mut self) -> Option<ComponentId> {
        if self.order.is_empty() {
            return None;
        }
        self.cursor = Some(match self.cursor {
            Some(index) => (index + 1) % self.order.len(),
            None => 0,
        });
        self.current()
    }

    /// Retreat the cursor with wraparound and return the new holder.
    /// With no cursor yet, starts at the last entry.
    pub fn previous(&mut self) -> Option<ComponentId> {
        if self.order.is_empty() {
            return None;
        }
        let len = self.order.len();
        self.cursor = Some(match self.cursor {
            Some(index) => (index + len - 1) % len,
            None => len - 1,
        });
        self.current()
    }
}

/// Pre-order collection of focusable component ids.
pub(crate) fn collect_focusable(node: &dyn Component, out: &mut Vec<ComponentId>) {
    if node.focusable() {
        out.push(node.id());
    }
    for index in 0..node.child_count() {
        if let Some(child) = node.child_at(index) {
            collect_focusable(child, out);
        }
    }
}
