#![forbid(unsafe_code)]

//! Linear layout along a single axis.

use trellis_core::component::{Component, ComponentId};
use trellis_core::geometry::Rect;
use trellis_core::screen::Screen;

use crate::{SizeMode, distribute};

/// Main-axis direction of a [`Flex`] container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Children side by side; the main axis is width.
    #[default]
    Horizontal,
    /// Children stacked; the main axis is height.
    Vertical,
}

struct FlexEntry {
    mode: SizeMode,
    component: Box<dyn Component>,
}

/// A container that lays out children along one axis.
///
/// Each entry is either `Fixed(extent)` or `Proportional(weight)`; the
/// proportional entries split whatever the fixed entries leave over, with
/// the exact-sum rounding policy of the distribution solver. Children
/// receive the container's full cross-axis extent and are drawn in
/// declaration order.
pub struct Flex {
    id: ComponentId,
    rect: Rect,
    direction: Direction,
    entries: Vec<FlexEntry>,
}

impl Flex {
    /// Create a container with children side by side.
    #[must_use]
    pub fn horizontal() -> Self {
        Self::new(Direction::Horizontal)
    }

    /// Create a container with children stacked vertically.
    #[must_use]
    pub fn vertical() -> Self {
        Self::new(Direction::Vertical)
    }

    /// Create a container with an explicit direction.
    #[must_use]
    pub fn new(direction: Direction) -> Self {
        Self {
            id: ComponentId::next(),
            rect: Rect::default(),
            direction,
            entries: Vec::new(),
        }
    }

    /// Builder form of [`add`](Self::add).
    #[must_use]
    pub fn with(mut self, component: impl Component + 'static, mode: SizeMode) -> Self {
        self.add(component, mode);
        self
    }

    /// Append a child. Geometry for every child is recomputed immediately.
    pub fn add(&mut self, component: impl Component + 'static, mode: SizeMode) {
        self.entries.push(FlexEntry {
            mode,
            component: Box::new(component),
        });
        self.layout();
    }

    /// Remove the child with the given id, returning it if present.
    /// Remaining children are re-laid-out.
    pub fn remove(&mut self, id: ComponentId) -> Option<Box<dyn Component>> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.component.id() == id)?;
        let removed = self.entries.remove(index).component;
        self.layout();
        Some(removed)
    }

    /// Number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the container has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn layout(&mut self) {
        let modes: Vec<SizeMode> = self.entries.iter().map(|entry| entry.mode).collect();
        let total = match self.direction {
            Direction::Horizontal => self.rect.width,
            Direction::Vertical => self.rect.height,
        };
        let extents = distribute(total, &modes);

        let mut offset: u16 = 0;
        for (entry, extent) in self.entries.iter_mut().zip(extents) {
            let child_rect = match self.direction {
                Direction::Horizontal => Rect::new(
                    self.rect.x.saturating_add(offset),
                    self.rect.y,
                    extent,
                    self.rect.height,
                ),
                Direction::Vertical => Rect::new(
                    self.rect.x,
                    self.rect.y.saturating_add(offset),
                    self.rect.width,
                    extent,
                ),
            };
            entry.component.set_rect(child_rect);
            offset = offset.saturating_add(extent);
        }
    }
}

impl Component for Flex {
    fn id(&self) -> ComponentId {
        self.id
    }

    fn draw(&mut self, screen: &mut dyn Screen) {
        for entry in &mut self.entries {
            entry.component.draw(screen);
        }
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
        self.layout();
    }

    fn child_count(&self) -> usize {
        self.entries.len()
    }

    fn child_at(&self, index: usize) -> Option<&dyn Component> {
        self.entries.get(index).map(|entry| &*entry.component)
    }

    fn child_at_mut(&mut self, index: usize) -> Option<&mut dyn Component> {
        self.entries
            .get_mut(index)
            .map(|entry| &mut *entry.component as &mut dyn Component)
    }
}
