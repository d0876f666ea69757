#![forbid(unsafe_code)]

//! Instrumented tree nodes for unit tests.
//!
//! `TestNode` records every handler invocation into a shared log so tests
//! can assert on exact visit order, and exposes knobs for the capability
//! surface (focusable, key/mouse handling, capture, paste consumption).

use std::cell::RefCell;
use std::rc::Rc;

use trellis_core::component::{Component, ComponentId, FocusHandler, KeyHandler, MouseHandler};
use trellis_core::event::{KeyEvent, MouseEvent, PasteEvent};
use trellis_core::geometry::Rect;
use trellis_core::screen::Screen;

pub(crate) type Log = Rc<RefCell<Vec<String>>>;

pub(crate) struct TestNode {
    id: ComponentId,
    name: String,
    log: Log,
    rect: Rect,
    focusable: bool,
    focused: bool,
    captures: bool,
    has_key: bool,
    key_consume: bool,
    has_mouse: bool,
    mouse_consume: bool,
    paste_consume: bool,
    panic_on_key: bool,
    children: Vec<TestNode>,
}

impl TestNode {
    pub(crate) fn log() -> Log {
        Rc::new(RefCell::new(Vec::new()))
    }

    pub(crate) fn new(name: &str, log: &Log) -> Self {
        Self::new_owned(name.to_string(), log)
    }

    pub(crate) fn new_owned(name: String, log: &Log) -> Self {
        Self {
            id: ComponentId::next(),
            name,
            log: Rc::clone(log),
            rect: Rect::default(),
            focusable: false,
            focused: false,
            captures: false,
            has_key: false,
            key_consume: false,
            has_mouse: false,
            mouse_consume: false,
            paste_consume: false,
            panic_on_key: false,
            children: Vec::new(),
        }
    }

    pub(crate) fn child(mut self, child: TestNode) -> Self {
        self.children.push(child);
        self
    }

    pub(crate) fn focusable(mut self) -> Self {
        self.focusable = true;
        self
    }

    pub(crate) fn at(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    pub(crate) fn handles_keys(mut self, consume: bool) -> Self {
        self.has_key = true;
        self.key_consume = consume;
        self
    }

    pub(crate) fn captures_keys(mut self, consume: bool) -> Self {
        self.captures = true;
        self.has_key = true;
        self.key_consume = consume;
        self
    }

    pub(crate) fn handles_mouse(mut self, consume: bool) -> Self {
        self.has_mouse = true;
        self.mouse_consume = consume;
        self
    }

    pub(crate) fn consumes_paste(mut self) -> Self {
        self.paste_consume = true;
        self
    }

    pub(crate) fn panics_on_key(mut self) -> Self {
        self.has_key = true;
        self.panic_on_key = true;
        self
    }

    /// Find a node's id by name, depth-first.
    pub(crate) fn named_id(&self, name: &str) -> Option<ComponentId> {
        if self.name == name {
            return Some(self.id);
        }
        self.children.iter().find_map(|child| child.named_id(name))
    }

    fn record(&self, entry: String) {
        self.log.borrow_mut().push(entry);
    }
}

impl Component for TestNode {
    fn id(&self) -> ComponentId {
        self.id
    }

    fn draw(&mut self, screen: &mut dyn Screen) {
        for child in &mut self.children {
            child.draw(screen);
        }
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    fn focusable(&self) -> bool {
        self.focusable
    }

    fn on_paste(&mut self, event: &PasteEvent) -> bool {
        self.record(format!("paste:{}:{}", self.name, event.text));
        self.paste_consume
    }

    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn child_at(&self, index: usize) -> Option<&dyn Component> {
        self.children.get(index).map(|child| child as &dyn Component)
    }

    fn child_at_mut(&mut self, index: usize) -> Option<&mut dyn Component> {
        self.children
            .get_mut(index)
            .map(|child| child as &mut dyn Component)
    }

    fn captures_input(&self) -> bool {
        self.captures
    }

    fn as_key_handler(&mut self) -> Option<&mut dyn KeyHandler> {
        if self.has_key { Some(self) } else { None }
    }

    fn as_mouse_handler(&mut self) -> Option<&mut dyn MouseHandler> {
        if self.has_mouse { Some(self) } else { None }
    }

    fn as_focus_handler(&mut self) -> Option<&mut dyn FocusHandler> {
        if self.focusable { Some(self) } else { None }
    }
}

impl KeyHandler for TestNode {
    fn on_key(&mut self, _event: &KeyEvent) -> bool {
        self.record(format!("key:{}", self.name));
        if self.panic_on_key {
            panic!("handler failure in {}", self.name);
        }
        self.key_consume
    }
}

impl MouseHandler for TestNode {
    fn on_mouse(&mut self, event: &MouseEvent) -> bool {
        self.record(format!("mouse:{}@{},{}", self.name, event.x, event.y));
        self.mouse_consume
    }
}

impl FocusHandler for TestNode {
    fn focus(&mut self) {
        self.focused = true;
        self.record(format!("focus:{}", self.name));
    }

    fn blur(&mut self) {
        self.focused = false;
        self.record(format!("blur:{}", self.name));
    }

    fn has_focus(&self) -> bool {
        self.focused
    }
}
