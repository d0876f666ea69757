#![forbid(unsafe_code)]

//! Event routing over the component tree.
//!
//! Routing never follows parent pointers (there are none): the root-to-
//! target path is built first as an explicit list of child indexes, then
//! handlers are invoked by re-descending to each node in turn. That makes
//! the two scan directions - capture (root toward target) and bubble
//! (target toward root) - plain loops over the path, independently testable
//! of the tree's concrete shape.
//!
//! Delivery order for both keys and mouse:
//!
//! 1. Capture-enabled ancestors, nearest the root first. A `true` return
//!    consumes the event before any descendant sees it.
//! 2. The target itself.
//! 3. Bubbling outward through the remaining ancestors, skipping those
//!    already offered the event during capture.
//!
//! Every handler invocation runs inside a recovery boundary: a panicking
//! application handler is logged and treated as "did not consume", so one
//! faulty handler cannot take down the loop.

use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::error;
use trellis_core::component::{Component, ComponentId};
use trellis_core::event::{KeyEvent, MouseEvent};

/// Child-index path from the root to a target node (empty = the root
/// itself).
pub(crate) type Path = Vec<usize>;

/// Locate `target` in the tree, returning its path.
pub(crate) fn find_path(root: &dyn Component, target: ComponentId) -> Option<Path> {
    let mut path = Vec::new();
    if walk(root, target, &mut path) {
        Some(path)
    } else {
        None
    }
}

fn walk(node: &dyn Component, target: ComponentId, path: &mut Path) -> bool {
    if node.id() == target {
        return true;
    }
    for index in 0..node.child_count() {
        if let Some(child) = node.child_at(index) {
            path.push(index);
            if walk(child, target, path) {
                return true;
            }
            path.pop();
        }
    }
    false
}

/// Whether `target` is currently reachable from `root`.
pub(crate) fn contains(root: &dyn Component, target: ComponentId) -> bool {
    find_path(root, target).is_some()
}

/// Descend to the node at `path`.
pub(crate) fn node_at<'a>(
    root: &'a mut dyn Component,
    path: &[usize],
) -> Option<&'a mut dyn Component> {
    let mut node = root;
    for &index in path {
        node = node.child_at_mut(index)?;
    }
    Some(node)
}

/// Hit-test from the root: at each level pick the child whose rectangle
/// contains the absolute point, scanning visual front-to-back (last drawn
/// first). Stops at the deepest containing node; an empty result means only
/// the root contains the point (or nothing does - callers decide).
pub(crate) fn hit_path(root: &dyn Component, x: u16, y: u16) -> Path {
    let mut path = Vec::new();
    let mut node = root;
    loop {
        let mut hit = None;
        for index in (0..node.child_count()).rev() {
            if let Some(child) = node.child_at(index)
                && child.rect().contains(x, y)
            {
                hit = Some((index, child));
                break;
            }
        }
        let Some((index, child)) = hit else { break };
        path.push(index);
        node = child;
    }
    path
}

/// Deliver a key event along `path` per the capture/target/bubble order.
pub(crate) fn dispatch_key(root: &mut dyn Component, path: &[usize], event: &KeyEvent) -> bool {
    // Capture scan: strict ancestors of the target, root first.
    let mut captured = Vec::new();
    for depth in 0..path.len() {
        let Some(node) = node_at(root, &path[..depth]) else {
            return false;
        };
        if node.captures_input()
            && let Some(handler) = node.as_key_handler()
        {
            captured.push(depth);
            if guarded(|| handler.on_key(event)) {
                return true;
            }
        }
    }

    // Target, then bubble outward. Depth counts prefix length; the target
    // sits at depth == path.len().
    for depth in (0..=path.len()).rev() {
        if captured.contains(&depth) {
            continue;
        }
        let Some(node) = node_at(root, &path[..depth]) else {
            return false;
        };
        if let Some(handler) = node.as_key_handler()
            && guarded(|| handler.on_key(event))
        {
            return true;
        }
    }
    false
}

/// Deliver a mouse event along `path`, translating coordinates into each
/// receiver's local space. `event` carries absolute coordinates.
pub(crate) fn dispatch_mouse(root: &mut dyn Component, path: &[usize], event: &MouseEvent) -> bool {
    let mut captured = Vec::new();
    for depth in 0..path.len() {
        let Some(node) = node_at(root, &path[..depth]) else {
            return false;
        };
        if node.captures_input() {
            let (x, y) = node.rect().to_local(event.x, event.y);
            let local = event.at(x, y);
            if let Some(handler) = node.as_mouse_handler() {
                captured.push(depth);
                if guarded(|| handler.on_mouse(&local)) {
                    return true;
                }
            }
        }
    }

    for depth in (0..=path.len()).rev() {
        if captured.contains(&depth) {
            continue;
        }
        let Some(node) = node_at(root, &path[..depth]) else {
            return false;
        };
        let (x, y) = node.rect().to_local(event.x, event.y);
        let local = event.at(x, y);
        if let Some(handler) = node.as_mouse_handler()
            && guarded(|| handler.on_mouse(&local))
        {
            return true;
        }
    }
    false
}

/// Recovery boundary for one handler invocation. A panic is logged and
/// counts as "not consumed".
pub(crate) fn guarded<F: FnOnce() -> bool>(f: F) -> bool {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(consumed) => consumed,
        Err(payload) => {
            error!("event handler panicked: {}", panic_message(&payload));
            false
        }
    }
}

/// Recovery boundary for a handler invocation with no result.
pub(crate) fn guarded_unit<F: FnOnce()>(f: F) {
    if let Err(payload) = catch_unwind(AssertUnwindSafe(f)) {
        error!("focus handler panicked: {}", panic_message(&payload));
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestNode;
    use trellis_core::event::{KeyCode, MouseButton, MouseEventKind};
    use trellis_core::geometry::Rect;

    fn key() -> KeyEvent {
        KeyEvent::new(KeyCode::Char('x'))
    }

    #[test]
    fn find_path_and_node_at_agree() {
        let log = TestNode::log();
        let tree = TestNode::new("root", &log)
            .child(TestNode::new("a", &log).child(TestNode::new("a1", &log)))
            .child(TestNode::new("b", &log));
        let a1 = tree.named_id("a1").unwrap();
        let b = tree.named_id("b").unwrap();

        assert_eq!(find_path(&tree, a1), Some(vec![0, 0]));
        assert_eq!(find_path(&tree, b), Some(vec![1]));
        assert_eq!(find_path(&tree, tree.id()), Some(vec![]));
        // An id never added to the tree is unreachable.
        assert_eq!(find_path(&tree, ComponentId::next()), None);

        let mut tree = tree;
        let node = node_at(&mut tree, &[0, 0]).unwrap();
        assert_eq!(node.id(), a1);
    }

    #[test]
    fn unconsumed_key_bubbles_leaf_to_root() {
        let log = TestNode::log();
        let mut tree = TestNode::new("root", &log).handles_keys(true).child(
            TestNode::new("ancestor", &log)
                .handles_keys(false)
                .child(TestNode::new("leaf", &log).focusable().handles_keys(false)),
        );
        let leaf = tree.named_id("leaf").unwrap();
        let path = find_path(&tree, leaf).unwrap();

        assert!(dispatch_key(&mut tree, &path, &key()));
        assert_eq!(
            *log.borrow(),
            vec!["key:leaf", "key:ancestor", "key:root"],
            "dispatch path must visit exactly leaf, ancestor, root in order"
        );
    }

    #[test]
    fn leaf_consumption_stops_bubbling() {
        let log = TestNode::log();
        let mut tree = TestNode::new("root", &log)
            .handles_keys(true)
            .child(TestNode::new("leaf", &log).focusable().handles_keys(true));
        let leaf = tree.named_id("leaf").unwrap();
        let path = find_path(&tree, leaf).unwrap();

        assert!(dispatch_key(&mut tree, &path, &key()));
        assert_eq!(*log.borrow(), vec!["key:leaf"]);
    }

    #[test]
    fn capturing_ancestor_intercepts_before_leaf() {
        let log = TestNode::log();
        let mut tree = TestNode::new("root", &log).child(
            TestNode::new("modal", &log)
                .captures_keys(true)
                .child(TestNode::new("leaf", &log).focusable().handles_keys(true)),
        );
        let leaf = tree.named_id("leaf").unwrap();
        let path = find_path(&tree, leaf).unwrap();

        assert!(dispatch_key(&mut tree, &path, &key()));
        assert_eq!(*log.borrow(), vec!["key:modal"]);
    }

    #[test]
    fn declined_capture_continues_to_leaf_without_revisit() {
        let log = TestNode::log();
        let mut tree = TestNode::new("root", &log).handles_keys(false).child(
            TestNode::new("modal", &log)
                .captures_keys(false)
                .child(TestNode::new("leaf", &log).focusable().handles_keys(false)),
        );
        let leaf = tree.named_id("leaf").unwrap();
        let path = find_path(&tree, leaf).unwrap();

        assert!(!dispatch_key(&mut tree, &path, &key()));
        // Modal was asked once (capture), not again during bubble.
        assert_eq!(*log.borrow(), vec!["key:modal", "key:leaf", "key:root"]);
    }

    #[test]
    fn nested_captures_ask_outermost_first() {
        let log = TestNode::log();
        let mut tree = TestNode::new("root", &log).child(
            TestNode::new("outer", &log).captures_keys(false).child(
                TestNode::new("inner", &log)
                    .captures_keys(true)
                    .child(TestNode::new("leaf", &log).focusable().handles_keys(true)),
            ),
        );
        let leaf = tree.named_id("leaf").unwrap();
        let path = find_path(&tree, leaf).unwrap();

        assert!(dispatch_key(&mut tree, &path, &key()));
        assert_eq!(*log.borrow(), vec!["key:outer", "key:inner"]);
    }

    #[test]
    fn empty_path_delivers_to_root_only() {
        let log = TestNode::log();
        let mut tree = TestNode::new("root", &log).handles_keys(true);
        assert!(dispatch_key(&mut tree, &[], &key()));
        assert_eq!(*log.borrow(), vec!["key:root"]);
    }

    #[test]
    fn panicking_handler_is_contained_and_declines() {
        let log = TestNode::log();
        let mut tree = TestNode::new("root", &log)
            .handles_keys(true)
            .child(TestNode::new("leaf", &log).focusable().panics_on_key());
        let leaf = tree.named_id("leaf").unwrap();
        let path = find_path(&tree, leaf).unwrap();

        // The panic is recovered and the event continues to the root.
        assert!(dispatch_key(&mut tree, &path, &key()));
        assert_eq!(*log.borrow(), vec!["key:leaf", "key:root"]);
    }

    #[test]
    fn hit_path_picks_last_drawn_on_overlap() {
        let log = TestNode::log();
        let tree = TestNode::new("root", &log)
            .at(Rect::new(0, 0, 20, 10))
            .child(
                TestNode::new("under", &log)
                    .at(Rect::new(0, 0, 10, 10))
                    .handles_mouse(true),
            )
            .child(
                TestNode::new("over", &log)
                    .at(Rect::new(5, 0, 10, 10))
                    .handles_mouse(true),
            );

        // Overlap region: the later (front) child wins.
        assert_eq!(hit_path(&tree, 7, 3), vec![1]);
        // Only the first child contains this point.
        assert_eq!(hit_path(&tree, 2, 3), vec![0]);
        // Neither child: empty path, the container itself is the target.
        assert_eq!(hit_path(&tree, 17, 3), Vec::<usize>::new());
    }

    #[test]
    fn mouse_coordinates_are_local_to_each_receiver() {
        let log = TestNode::log();
        let mut tree = TestNode::new("root", &log)
            .at(Rect::new(0, 0, 20, 10))
            .handles_mouse(true)
            .child(
                TestNode::new("inner", &log)
                    .at(Rect::new(4, 2, 8, 4))
                    .handles_mouse(false),
            );
        let event = MouseEvent::new(MouseEventKind::Down(MouseButton::Left), 6, 3);
        let path = hit_path(&tree, event.x, event.y);
        assert_eq!(path, vec![0]);

        assert!(dispatch_mouse(&mut tree, &path, &event));
        // inner sees (6-4, 3-2); root sees absolute (its origin is 0,0).
        assert_eq!(*log.borrow(), vec!["mouse:inner@2,1", "mouse:root@6,3"]);
    }
}
