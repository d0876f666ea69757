#![forbid(unsafe_code)]

//! Bordered single-child wrapper.

use trellis_core::component::{Component, ComponentId, KeyHandler};
use trellis_core::event::KeyEvent;
use trellis_core::geometry::Rect;
use trellis_core::screen::Screen;
use trellis_core::style::Style;

use crate::print_clipped;

const HORIZONTAL: char = '─';
const VERTICAL: char = '│';
const TOP_LEFT: char = '┌';
const TOP_RIGHT: char = '┐';
const BOTTOM_LEFT: char = '└';
const BOTTOM_RIGHT: char = '┘';

/// A box around a single child: border, optional title, and an optional
/// key-capture hook.
///
/// The child receives the rectangle inside the border. With a capture hook
/// installed the panel asks for first refusal of key events traveling to
/// its descendants - the modal-wrapper case: dispatch offers the event to
/// capturing ancestors nearest the root before the focused leaf sees it.
pub struct Panel {
    id: ComponentId,
    rect: Rect,
    child: Box<dyn Component>,
    title: Option<String>,
    border_style: Style,
    title_style: Style,
    key_capture: Option<Box<dyn FnMut(&KeyEvent) -> bool>>,
}

impl Panel {
    /// Wrap `child` in a border.
    #[must_use]
    pub fn new(child: impl Component + 'static) -> Self {
        Self {
            id: ComponentId::next(),
            rect: Rect::default(),
            child: Box::new(child),
            title: None,
            border_style: Style::new(),
            title_style: Style::new(),
            key_capture: None,
        }
    }

    /// Set the title shown on the top border.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the style of the border characters.
    #[must_use]
    pub fn with_border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    /// Set the style of the title text.
    #[must_use]
    pub fn with_title_style(mut self, style: Style) -> Self {
        self.title_style = style;
        self
    }

    /// Install a key-capture hook, making this panel a capturing ancestor.
    ///
    /// The hook sees key events headed for any descendant before the
    /// focused leaf does; returning `true` consumes the event.
    pub fn set_key_capture(&mut self, hook: impl FnMut(&KeyEvent) -> bool + 'static) {
        self.key_capture = Some(Box::new(hook));
    }

    /// Builder form of [`set_key_capture`](Self::set_key_capture).
    #[must_use]
    pub fn with_key_capture(mut self, hook: impl FnMut(&KeyEvent) -> bool + 'static) -> Self {
        self.set_key_capture(hook);
        self
    }

    /// The rectangle inside the border.
    #[must_use]
    pub fn inner(&self) -> Rect {
        self.rect.inset(1)
    }

    fn draw_border(&mut self, screen: &mut dyn Screen) {
        let rect = self.rect;
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let right = rect.right() - 1;
        let bottom = rect.bottom() - 1;

        for x in (rect.x + 1)..right {
            screen.set_cell(x, rect.y, HORIZONTAL, self.border_style);
            screen.set_cell(x, bottom, HORIZONTAL, self.border_style);
        }
        for y in (rect.y + 1)..bottom {
            screen.set_cell(rect.x, y, VERTICAL, self.border_style);
            screen.set_cell(right, y, VERTICAL, self.border_style);
        }
        screen.set_cell(rect.x, rect.y, TOP_LEFT, self.border_style);
        screen.set_cell(right, rect.y, TOP_RIGHT, self.border_style);
        screen.set_cell(rect.x, bottom, BOTTOM_LEFT, self.border_style);
        screen.set_cell(right, bottom, BOTTOM_RIGHT, self.border_style);

        if let Some(title) = self.title.clone()
            && rect.width > 4
        {
            let max = rect.width - 4;
            print_clipped(screen, rect.x + 2, rect.y, max, &title, self.title_style);
        }
    }
}

impl Component for Panel {
    fn id(&self) -> ComponentId {
        self.id
    }

    fn draw(&mut self, screen: &mut dyn Screen) {
        self.draw_border(screen);
        self.child.draw(screen);
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
        self.child.set_rect(rect.inset(1));
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

    fn captures_input(&self) -> bool {
        self.key_capture.is_some()
    }

    fn as_key_handler(&mut self) -> Option<&mut dyn KeyHandler> {
        if self.key_capture.is_some() {
            Some(self)
        } else {
            None
        }
    }
}

impl KeyHandler for Panel {
    fn on_key(&mut self, event: &KeyEvent) -> bool {
        match &mut self.key_capture {
            Some(hook) => hook(event),
            None => false,
        }
    }
}
