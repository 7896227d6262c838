// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A headless host for tests and demos.
//!
//! [`SimHost`] implements [`EventSource`] and [`Viewport`] without a windowing system; events are
//! fired explicitly with [`SimHost::resize`], [`SimHost::scroll_window_to`],
//! [`SimHost::scroll_node`], and [`SimHost::click`]. [`SimNode`] is a reference-counted element
//! with a settable bounding box and a parent link for containment tests.
//!
//! Dispatch looks each listener up again right before calling it, so a listener removed by an
//! earlier handler in the same dispatch does not run.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use kurbo::{Rect, Size, Vec2};

use crate::host::{
    Element, Event, EventKind, EventSource, EventTarget, Listener, ListenerId, ListenerOptions,
    Viewport,
};

struct NodeData {
    rect: Cell<Rect>,
    parent: RefCell<Option<SimNode>>,
}

/// A simulated element. Clones are the same node; equality is identity.
#[derive(Clone)]
pub struct SimNode(Rc<NodeData>);

impl SimNode {
    /// A root node with the given viewport-relative bounding box.
    pub fn new(rect: Rect) -> Self {
        Self(Rc::new(NodeData {
            rect: Cell::new(rect),
            parent: RefCell::new(None),
        }))
    }

    /// A node attached under `parent`.
    pub fn child_of(parent: &Self, rect: Rect) -> Self {
        let node = Self::new(rect);
        *node.0.parent.borrow_mut() = Some(parent.clone());
        node
    }

    /// Current bounding box.
    pub fn rect(&self) -> Rect {
        self.0.rect.get()
    }

    /// Replace the bounding box, as a layout pass would.
    pub fn set_rect(&self, rect: Rect) {
        self.0.rect.set(rect);
    }

    /// Parent node, if attached.
    pub fn parent(&self) -> Option<Self> {
        self.0.parent.borrow().clone()
    }

    /// Remove this node from its parent.
    pub fn detach(&self) {
        self.0.parent.borrow_mut().take();
    }
}

impl PartialEq for SimNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for SimNode {}

impl core::fmt::Debug for SimNode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SimNode")
            .field("rect", &self.rect())
            .field("attached", &self.0.parent.borrow().is_some())
            .finish()
    }
}

impl Element for SimNode {
    fn bounding_rect(&self) -> Rect {
        self.rect()
    }

    fn contains(&self, other: &Self) -> bool {
        let mut cur = Some(other.clone());
        while let Some(node) = cur {
            if node == *self {
                return true;
            }
            cur = node.parent();
        }
        false
    }
}

struct Registration {
    id: ListenerId,
    target: EventTarget<SimNode>,
    kind: EventKind,
    options: ListenerOptions,
    listener: Listener<SimNode>,
}

/// A simulated window and document.
pub struct SimHost {
    size: Cell<Size>,
    scroll: Cell<Vec2>,
    next_id: Cell<u64>,
    registrations: RefCell<Vec<Registration>>,
}

impl core::fmt::Debug for SimHost {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SimHost")
            .field("size", &self.size.get())
            .field("scroll", &self.scroll.get())
            .field("listeners", &self.listener_count())
            .finish_non_exhaustive()
    }
}

impl SimHost {
    /// An unscrolled host with the given viewport size.
    pub fn new(size: Size) -> Self {
        Self {
            size: Cell::new(size),
            scroll: Cell::new(Vec2::ZERO),
            next_id: Cell::new(1),
            registrations: RefCell::new(Vec::new()),
        }
    }

    /// Resize the viewport and fire a window `Resize` event.
    pub fn resize(&self, size: Size) {
        self.size.set(size);
        self.dispatch(&EventTarget::Window, EventKind::Resize, None);
    }

    /// Scroll the document and fire a window `Scroll` event.
    pub fn scroll_window_to(&self, offset: Vec2) {
        self.scroll.set(offset);
        self.dispatch(&EventTarget::Window, EventKind::Scroll, None);
    }

    /// Fire a `Scroll` event on `node`.
    pub fn scroll_node(&self, node: &SimNode) {
        self.dispatch(&EventTarget::Node(node.clone()), EventKind::Scroll, None);
    }

    /// Click `target`: document listeners run, capture-phase registrations first.
    pub fn click(&self, target: &SimNode) {
        self.dispatch(&EventTarget::Document, EventKind::Click, Some(target));
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.registrations.borrow().len()
    }

    /// Number of registered capture-phase listeners.
    pub fn capture_listener_count(&self) -> usize {
        self.registrations
            .borrow()
            .iter()
            .filter(|r| r.options.capture)
            .count()
    }

    fn dispatch(&self, target: &EventTarget<SimNode>, kind: EventKind, origin: Option<&SimNode>) {
        let mut ids: Vec<(bool, ListenerId)> = self
            .registrations
            .borrow()
            .iter()
            .filter(|r| r.kind == kind && r.target == *target)
            .map(|r| (!r.options.capture, r.id))
            .collect();
        // Stable: capture listeners first, registration order within each phase.
        ids.sort_by_key(|(bubble, _)| *bubble);

        let event = Event {
            kind,
            target: origin,
        };
        for (_, id) in ids {
            let listener = self
                .registrations
                .borrow()
                .iter()
                .find(|r| r.id == id)
                .map(|r| Rc::clone(&r.listener));
            if let Some(listener) = listener {
                listener(&event);
            }
        }
    }
}

impl Viewport for SimHost {
    fn viewport_size(&self) -> Size {
        self.size.get()
    }

    fn scroll_offset(&self) -> Vec2 {
        self.scroll.get()
    }
}

impl EventSource for SimHost {
    type Node = SimNode;

    fn add_listener(
        &self,
        target: EventTarget<SimNode>,
        kind: EventKind,
        options: ListenerOptions,
        listener: Listener<SimNode>,
    ) -> ListenerId {
        let id = ListenerId::new(self.next_id.get());
        self.next_id.set(id.get() + 1);
        self.registrations.borrow_mut().push(Registration {
            id,
            target,
            kind,
            options,
            listener,
        });
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        self.registrations.borrow_mut().retain(|r| r.id != id);
    }
}
