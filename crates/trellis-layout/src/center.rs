#![forbid(unsafe_code)]

//! Centering containers.

use trellis_core::component::{Component, ComponentId};
use trellis_core::geometry::Rect;
use trellis_core::screen::Screen;
use trellis_core::style::Style;

#[derive(Debug, Clone, Copy, PartialEq)]
enum CenterMode {
    Fixed { width: u16, height: u16 },
    Fractional { width: f32, height: f32 },
}

/// Centers a single child within the available space.
///
/// Fixed mode clamps the configured size to what is available; fractional
/// mode takes a share of each axis (`round(fraction * available)`, ties to
/// even, clamped into the available range). The centering offset floors, so
/// an odd leftover biases the child one cell toward the top-left. The
/// border region around the child belongs to no component; this container
/// paints it with a uniform background if one is configured.
pub struct Center {
    id: ComponentId,
    rect: Rect,
    mode: CenterMode,
    child: Box<dyn Component>,
    background: Option<Style>,
}

impl Center {
    /// Center `child` at a fixed size (clamped to the available space).
    #[must_use]
    pub fn fixed(width: u16, height: u16, child: impl Component + 'static) -> Self {
        Self {
            id: ComponentId::next(),
            rect: Rect::default(),
            mode: CenterMode::Fixed { width, height },
            child: Box::new(child),
            background: None,
        }
    }

    /// Center `child` at a fraction of the available space.
    ///
    /// Fractions are clamped into `[0, 1]` at construction.
    #[must_use]
    pub fn fractional(width: f32, height: f32, child: impl Component + 'static) -> Self {
        Self {
            id: ComponentId::next(),
            rect: Rect::default(),
            mode: CenterMode::Fractional {
                width: width.clamp(0.0, 1.0),
                height: height.clamp(0.0, 1.0),
            },
            child: Box::new(child),
            background: None,
        }
    }

    /// Paint the border region with this background style.
    #[must_use]
    pub fn with_background(mut self, style: Style) -> Self {
        self.background = Some(style);
        self
    }

    fn child_size(&self) -> (u16, u16) {
        let available = (self.rect.width, self.rect.height);
        match self.mode {
            CenterMode::Fixed { width, height } => {
                (width.min(available.0), height.min(available.1))
            }
            CenterMode::Fractional { width, height } => (
                fractional_extent(width, available.0),
                fractional_extent(height, available.1),
            ),
        }
    }

    fn layout(&mut self) {
        let (child_width, child_height) = self.child_size();
        let offset_x = (self.rect.width - child_width) / 2;
        let offset_y = (self.rect.height - child_height) / 2;
        self.child.set_rect(Rect::new(
            self.rect.x.saturating_add(offset_x),
            self.rect.y.saturating_add(offset_y),
            child_width,
            child_height,
        ));
    }
}

/// `round(fraction * available)` with ties to even, clamped into
/// `[0, available]`.
fn fractional_extent(fraction: f32, available: u16) -> u16 {
    let raw = (fraction * available as f32).round_ties_even();
    (raw as u32).min(available as u32) as u16
}

impl Component for Center {
    fn id(&self) -> ComponentId {
        self.id
    }

    fn draw(&mut self, screen: &mut dyn Screen) {
        if let Some(background) = self.background {
            screen.fill(
                self.rect.x,
                self.rect.y,
                self.rect.width,
                self.rect.height,
                ' ',
                background,
            );
        }
        self.child.draw(screen);
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
        self.layout();
    }

    fn child_count(&self) -> usize {
        1
    }

    fn child_at(&self, index: usize) -> Option<&dyn Component> {
        (index == 0).then_some(&*self.child)
    }

    fn child_at_mut(&mut self, index: usize) -> Option<&mut dyn Component> {
        (index == 0).then_some(&mut *self.child as &mut dyn Component)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    struct Probe {
        id: ComponentId,
        rect: Rect,
    }

    impl Probe {
        fn new() -> Self {
            Self {
                id: ComponentId::next(),
                rect: Rect::default(),
            }
        }
    }

    impl Component for Probe {
        fn id(&self) -> ComponentId {
            self.id
        }

        fn draw(&mut self, _screen: &mut dyn Screen) {}

        fn rect(&self) -> Rect {
            self.rect
        }

        fn set_rect(&mut self, rect: Rect) {
            self.rect = rect;
        }
    }

    #[test]
    fn fixed_centers_with_floor_bias() {
        let mut center = Center::fixed(10, 4, Probe::new());
        center.set_rect(Rect::new(0, 0, 21, 9));
        // offsets floor: (21-10)/2 = 5, (9-4)/2 = 2
        assert_eq!(center.child_at(0).unwrap().rect(), Rect::new(5, 2, 10, 4));
    }

    #[test]
    fn fixed_clamps_to_available() {
        let mut center = Center::fixed(100, 100, Probe::new());
        center.set_rect(Rect::new(2, 3, 20, 10));
        assert_eq!(center.child_at(0).unwrap().rect(), Rect::new(2, 3, 20, 10));
    }

    #[test]
    fn fractional_half_in_odd_area() {
        let mut center = Center::fractional(0.5, 0.5, Probe::new());
        center.set_rect(Rect::new(0, 0, 101, 101));
        // 50.5 rounds to even -> 50; offset (101-50)/2 = 25.
        assert_eq!(
            center.child_at(0).unwrap().rect(),
            Rect::new(25, 25, 50, 50)
        );
    }

    #[test]
    fn fractions_clamp_at_construction() {
        let mut center = Center::fractional(1.5, -0.25, Probe::new());
        center.set_rect(Rect::new(0, 0, 10, 10));
        let rect = center.child_at(0).unwrap().rect();
        assert_eq!(rect.width, 10);
        assert_eq!(rect.height, 0);
    }

    #[test]
    fn relayout_on_resize_recenters() {
        let mut center = Center::fixed(4, 2, Probe::new());
        center.set_rect(Rect::new(0, 0, 10, 10));
        assert_eq!(center.child_at(0).unwrap().rect(), Rect::new(3, 4, 4, 2));

        center.set_rect(Rect::new(0, 0, 40, 20));
        assert_eq!(center.child_at(0).unwrap().rect(), Rect::new(18, 9, 4, 2));
    }

    proptest! {
        /// The child is always fully contained in the parent, on both axes.
        #[test]
        fn child_contained(fx in 0.0f32..=1.0, fy in 0.0f32..=1.0,
                           width in 0u16..200, height in 0u16..200) {
            let mut center = Center::fractional(fx, fy, Probe::new());
            center.set_rect(Rect::new(3, 5, width, height));
            let child = center.child_at(0).unwrap().rect();
            if child.is_empty() {
                // Zero-extent children have no footprint to contain.
                prop_assert!(child.width <= width && child.height <= height);
            } else {
                prop_assert!(center.rect().contains_rect(&child));
            }
        }
    }
}
