#![forbid(unsafe_code)]

//! The application: run/stop lifecycle, dispatch loop, focus, redraw.

use std::fmt;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::time::Duration;

use tracing::{debug, info};
use trellis_core::component::{Component, ComponentId};
use trellis_core::event::{Event, KeyCode, KeyEvent, MouseEvent, PasteEvent};
use trellis_core::geometry::Rect;
use trellis_core::screen::Screen;

use crate::dispatch::{
    contains, dispatch_key, dispatch_mouse, find_path, guarded, guarded_unit, hit_path, node_at,
};
use crate::focus::FocusChain;

const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Lifecycle errors surfaced by [`Application::start`].
#[derive(Debug)]
pub enum RuntimeError {
    /// `start` was called while the application is already running.
    AlreadyRunning,
    /// `start` was called after a completed run; applications are not
    /// restartable.
    Finished,
    /// Terminal I/O failure (including screen initialization).
    Io(io::Error),
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyRunning => write!(f, "application is already running"),
            Self::Finished => write!(f, "application has already run and cannot be restarted"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for RuntimeError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

const STATE_IDLE: u8 = 0;
const STATE_RUNNING: u8 = 1;
const STATE_STOPPING: u8 = 2;

/// The signal object shared between the dispatch loop and other threads.
///
/// Created on application construction, dropped with the last handle - an
/// explicit object rather than ambient global state. Everything in here is
/// atomic: handles never touch the tree or the screen.
#[derive(Debug, Default)]
struct Signals {
    state: AtomicU8,
    finished: AtomicBool,
    redraw: AtomicBool,
    stop: AtomicBool,
}

/// Cloneable, thread-safe handle to a running (or not-yet-running)
/// application.
///
/// This is the entire cross-thread surface: background threads may request
/// redraws and stop the loop, nothing else. The component tree has a single
/// owner and is never touched from a handle.
#[derive(Debug, Clone)]
pub struct AppHandle {
    signals: Arc<Signals>,
}

impl AppHandle {
    /// Request a coalesced redraw: any number of calls before the next draw
    /// pass produce exactly one draw.
    pub fn redraw_soon(&self) {
        self.signals.redraw.store(true, Ordering::Release);
    }

    /// Force a draw on the next loop turn, even if no event arrives.
    ///
    /// The draw itself always happens on the loop thread - the single
    /// writer of the screen - bounded by the loop's poll timeout.
    pub fn redraw(&self) {
        self.redraw_soon();
    }

    /// Stop the application. Callable from any thread, any number of
    /// times, before or after `start`; never blocks and never tears down
    /// the terminal itself (the loop does that exactly once).
    pub fn stop(&self) {
        self.signals.stop.store(true, Ordering::Release);
    }

    /// Whether the dispatch loop is currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.signals.state.load(Ordering::Acquire) == STATE_RUNNING
    }
}

/// Owns the root component, the focus chain, the redraw signal, and the
/// dispatch loop over a [`Screen`].
///
/// One logical thread - the one inside [`start`](Self::start) - owns the
/// screen and the tree and performs all drawing. Other threads interact
/// only through [`AppHandle`]. Handlers run synchronously on the loop
/// thread: a blocking handler stalls the whole UI (documented hazard, no
/// internal timeout is applied).
pub struct Application<S: Screen> {
    screen: S,
    root: Option<Box<dyn Component>>,
    focused: Option<ComponentId>,
    chain: FocusChain,
    size: (u16, u16),
    poll_timeout: Duration,
    signals: Arc<Signals>,
}

impl<S: Screen> Application<S> {
    /// Create an application over a screen backend. Nothing runs until
    /// [`start`](Self::start).
    #[must_use]
    pub fn new(screen: S) -> Self {
        Self {
            screen,
            root: None,
            focused: None,
            chain: FocusChain::new(),
            size: (0, 0),
            poll_timeout: DEFAULT_POLL_TIMEOUT,
            signals: Arc::new(Signals::default()),
        }
    }

    /// A thread-safe handle for redraw requests and stopping.
    #[must_use]
    pub fn handle(&self) -> AppHandle {
        AppHandle {
            signals: Arc::clone(&self.signals),
        }
    }

    /// How long one loop turn waits for input before checking signals.
    pub fn set_poll_timeout(&mut self, timeout: Duration) {
        self.poll_timeout = timeout;
    }

    /// Replace the tree root: full layout and focus-chain rebuild. Focus
    /// carries over only if the previously focused component is reachable
    /// in the new tree; otherwise it resets to none.
    pub fn set_root(&mut self, root: impl Component + 'static) {
        let mut root: Box<dyn Component> = Box::new(root);
        if self.size != (0, 0) {
            root.set_rect(Rect::from_size(self.size.0, self.size.1));
        }
        if let Some(focused) = self.focused
            && !contains(root.as_ref(), focused)
        {
            self.focused = None;
        }
        self.chain.rebuild(Some(root.as_ref()), self.focused);
        self.root = Some(root);
        self.redraw_soon();
    }

    /// Read access to the current root.
    #[must_use]
    pub fn root(&self) -> Option<&dyn Component> {
        self.root.as_deref()
    }

    /// The screen backend.
    #[must_use]
    pub fn screen(&self) -> &S {
        &self.screen
    }

    /// Mutable access to the screen backend (scripting test screens,
    /// adjusting options before `start`).
    pub fn screen_mut(&mut self) -> &mut S {
        &mut self.screen
    }

    /// The focused component, if it is still reachable from the root.
    #[must_use]
    pub fn focus(&self) -> Option<ComponentId> {
        let focused = self.focused?;
        let root = self.root.as_deref()?;
        contains(root, focused).then_some(focused)
    }

    /// Move focus to the given component.
    ///
    /// Fails without any state change if the component is not reachable
    /// from the root, not focusable, or has no focus-handler capability.
    /// Otherwise the previous holder is blurred, the new one notified, and
    /// the chain cursor re-derived from a fresh traversal.
    pub fn set_focus(&mut self, id: ComponentId) -> bool {
        let Some(root) = self.root.as_deref_mut() else {
            return false;
        };
        let Some(path) = find_path(root, id) else {
            return false;
        };
        {
            let Some(node) = node_at(root, &path) else {
                return false;
            };
            if !node.focusable() || node.as_focus_handler().is_none() {
                return false;
            }
        }

        if let Some(previous) = self.focused
            && previous != id
            && let Some(previous_path) = find_path(root, previous)
            && let Some(node) = node_at(root, &previous_path)
            && let Some(handler) = node.as_focus_handler()
        {
            guarded_unit(|| handler.blur());
        }

        if let Some(node) = node_at(root, &path)
            && let Some(handler) = node.as_focus_handler()
        {
            guarded_unit(|| handler.focus());
        }
        self.focused = Some(id);
        self.chain.rebuild(Some(&*root), self.focused);
        debug!(?id, "focus transferred");
        self.redraw_soon();
        true
    }

    /// Request a coalesced redraw (safe from handlers; for other threads
    /// use [`AppHandle::redraw_soon`]).
    pub fn redraw_soon(&self) {
        self.signals.redraw.store(true, Ordering::Release);
    }

    /// Perform a draw pass immediately, outside the per-event cadence.
    pub fn redraw(&mut self) -> io::Result<()> {
        self.draw_now()
    }

    /// Stop the loop; identical to [`AppHandle::stop`].
    pub fn stop(&self) {
        self.signals.stop.store(true, Ordering::Release);
    }

    /// Run the dispatch loop until [`stop`](Self::stop) completes.
    ///
    /// Blocks the calling thread. Returns the screen-initialization error
    /// if the backend cannot be acquired (with nothing left running, so a
    /// later retry is permitted). Calling `start` while running is an
    /// error, as is calling it again after a completed run.
    pub fn start(&mut self) -> Result<(), RuntimeError> {
        if self.signals.finished.load(Ordering::Acquire) {
            return Err(RuntimeError::Finished);
        }
        if self
            .signals
            .state
            .compare_exchange(
                STATE_IDLE,
                STATE_RUNNING,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            return Err(RuntimeError::AlreadyRunning);
        }

        if let Err(err) = self.screen.init() {
            self.signals.state.store(STATE_IDLE, Ordering::Release);
            return Err(RuntimeError::Io(err));
        }
        info!("application started");

        self.size = self.screen.size();
        if let Some(root) = self.root.as_deref_mut() {
            root.set_rect(Rect::from_size(self.size.0, self.size.1));
        }
        self.redraw_soon();

        let result = self.run_loop();
        self.finish();
        result.map_err(RuntimeError::Io)
    }

    fn run_loop(&mut self) -> io::Result<()> {
        while !self.signals.stop.load(Ordering::Acquire) {
            match self.screen.poll_event(self.poll_timeout)? {
                Some(event) => self.process_event(event)?,
                None => self.draw_if_pending()?,
            }
        }
        Ok(())
    }

    fn finish(&mut self) {
        self.signals.state.store(STATE_STOPPING, Ordering::Release);
        self.screen.fini();
        self.signals.finished.store(true, Ordering::Release);
        self.signals.state.store(STATE_IDLE, Ordering::Release);
        info!("application stopped");
    }

    /// One dispatch-loop body: route the event, then draw once if a redraw
    /// is pending. Public so event flow is testable without a terminal.
    pub fn process_event(&mut self, event: Event) -> io::Result<()> {
        match event {
            Event::Resize { width, height } => self.on_resize(width, height),
            Event::Key(key) => self.on_key(&key),
            Event::Mouse(mouse) => self.on_mouse(&mouse),
            Event::Paste(paste) => self.on_paste(&paste),
        }
        self.draw_if_pending()
    }

    fn on_resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        if let Some(root) = self.root.as_deref_mut() {
            root.set_rect(Rect::from_size(width, height));
        }
        debug!(width, height, "resized");
        self.redraw_soon();
    }

    fn on_key(&mut self, key: &KeyEvent) {
        self.validate_focus();
        let consumed = {
            let Some(root) = self.root.as_deref_mut() else {
                return;
            };
            let path = self
                .focused
                .and_then(|id| find_path(root, id))
                .unwrap_or_default();
            dispatch_key(root, &path, key)
        };

        if consumed {
            self.redraw_soon();
            return;
        }

        // Tab navigation only once no component claimed the key.
        match key.code {
            KeyCode::Tab if !key.shift() => self.focus_step(true),
            KeyCode::BackTab => self.focus_step(false),
            KeyCode::Tab => self.focus_step(false),
            _ => {}
        }
    }

    fn focus_step(&mut self, forward: bool) {
        let Some(root) = self.root.as_deref() else {
            return;
        };
        self.chain.rebuild(Some(root), self.focused);
        let next = if forward {
            self.chain.next()
        } else {
            self.chain.previous()
        };
        if let Some(id) = next {
            self.set_focus(id);
        }
    }

    fn on_mouse(&mut self, mouse: &MouseEvent) {
        let Some(root) = self.root.as_deref_mut() else {
            return;
        };
        let path = hit_path(&*root, mouse.x, mouse.y);
        if dispatch_mouse(root, &path, mouse) {
            self.redraw_soon();
        }
    }

    fn on_paste(&mut self, paste: &PasteEvent) {
        self.validate_focus();
        let Some(root) = self.root.as_deref_mut() else {
            return;
        };
        let mut consumed = false;
        let mut root_was_target = false;
        if let Some(id) = self.focused
            && let Some(path) = find_path(root, id)
            && let Some(node) = node_at(root, &path)
        {
            root_was_target = path.is_empty();
            consumed = guarded(|| node.on_paste(paste));
        }
        // Declined (or no focus): the root gets it, unless it already did.
        if !consumed && !root_was_target {
            consumed = guarded(|| root.on_paste(paste));
        }
        if consumed {
            self.redraw_soon();
        }
    }

    /// Reset focus to none if the focused component left the tree. The
    /// vanished component cannot be blurred - it is gone.
    fn validate_focus(&mut self) {
        if let Some(focused) = self.focused {
            let present = self
                .root
                .as_deref()
                .is_some_and(|root| contains(root, focused));
            if !present {
                debug!(?focused, "focused component left the tree");
                self.focused = None;
            }
        }
    }

    fn draw_if_pending(&mut self) -> io::Result<()> {
        if self.signals.redraw.swap(false, Ordering::AcqRel) {
            self.draw_now()?;
        }
        Ok(())
    }

    fn draw_now(&mut self) -> io::Result<()> {
        self.signals.redraw.store(false, Ordering::Release);
        self.screen.clear();
        if let Some(root) = self.root.as_deref_mut() {
            root.draw(&mut self.screen);
        }
        self.screen.show()
    }
}
