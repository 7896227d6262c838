// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host environment capabilities: elements, viewport, and event listeners.
//!
//! ## Overview
//!
//! The overlay never talks to a real windowing system or DOM. Instead, the embedding toolkit
//! implements three small traits:
//!
//! - [`Element`]: measure a node and test containment.
//! - [`Viewport`]: the live viewport size and document scroll offset.
//! - [`EventSource`]: register and remove listeners for resize, scroll, and click events.
//!
//! Any type implementing [`EventSource`] and [`Viewport`] is a [`Host`].
//! [`sim::SimHost`](crate::sim::SimHost) is a headless implementation for tests and demos.
//!
//! Element handles owned by the toolkit (anchor, floating element) are passed around as
//! [`NodeRef`]s, shared slots that may be empty until the element is mounted.

use alloc::rc::Rc;
use core::cell::RefCell;

use kurbo::{Rect, Size, Vec2};

/// A measurable node in the host's element tree.
pub trait Element: Clone + PartialEq + 'static {
    /// Bounding box in viewport coordinates, measured at call time.
    fn bounding_rect(&self) -> Rect;

    /// Returns true if `other` is this node or one of its descendants.
    ///
    /// Nodes detached from the tree are not contained by anything but themselves.
    fn contains(&self, other: &Self) -> bool;
}

/// Live viewport measurements.
pub trait Viewport {
    /// Visible viewport size.
    fn viewport_size(&self) -> Size;

    /// Current document scroll offset.
    fn scroll_offset(&self) -> Vec2;
}

/// Where a listener is registered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventTarget<N> {
    /// The window (resize, scroll).
    Window,
    /// The document (clicks anywhere).
    Document,
    /// A specific node, such as a scroll container.
    Node(N),
}

/// Kinds of host events the overlay consumes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Viewport resized.
    Resize,
    /// Window or element scrolled.
    Scroll,
    /// Pointer click.
    Click,
}

/// Listener registration options.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    /// Observe the event during the capture phase, before inner handlers can stop it.
    pub capture: bool,
}

impl ListenerOptions {
    /// Capture-phase registration.
    pub const CAPTURE: Self = Self { capture: true };
}

/// An event delivered to a listener.
#[derive(Debug)]
pub struct Event<'a, N> {
    /// What happened.
    pub kind: EventKind,
    /// Originating node, if any. `None` for window events.
    pub target: Option<&'a N>,
}

/// Shared listener callback.
pub type Listener<N> = Rc<dyn Fn(&Event<'_, N>)>;

/// Handle of a registered listener, issued by an [`EventSource`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Wrap a host-assigned identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The host-assigned identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Registers and removes event listeners.
///
/// Implementations must not invoke a listener after [`remove_listener`](Self::remove_listener)
/// returned for it, including later in the same dispatch.
pub trait EventSource {
    /// Element type of this host.
    type Node: Element;

    /// Register `listener` for `kind` events on `target`.
    fn add_listener(
        &self,
        target: EventTarget<Self::Node>,
        kind: EventKind,
        options: ListenerOptions,
        listener: Listener<Self::Node>,
    ) -> ListenerId;

    /// Remove a listener. Unknown ids are ignored.
    fn remove_listener(&self, id: ListenerId);
}

/// A complete host: events plus viewport measurements.
pub trait Host: EventSource + Viewport {}

impl<T: EventSource + Viewport> Host for T {}

/// Shared slot for an externally owned element that may not be mounted yet.
///
/// Clones share the same slot, so the toolkit can fill it in after handing it to an overlay.
pub struct NodeRef<N>(Rc<RefCell<Option<N>>>);

impl<N> NodeRef<N> {
    /// An empty slot.
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(None)))
    }

    /// A slot already holding `node`.
    pub fn with(node: N) -> Self {
        Self(Rc::new(RefCell::new(Some(node))))
    }

    /// Store `node`, returning the previous value.
    pub fn set(&self, node: N) -> Option<N> {
        self.0.borrow_mut().replace(node)
    }

    /// Empty the slot, returning the previous value.
    pub fn clear(&self) -> Option<N> {
        self.0.borrow_mut().take()
    }

    /// Returns true if the slot holds a node.
    pub fn is_resolved(&self) -> bool {
        self.0.borrow().is_some()
    }

    /// Returns true if both handles share the same slot.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<N: Clone> NodeRef<N> {
    /// Current node, if mounted.
    pub fn get(&self) -> Option<N> {
        self.0.borrow().clone()
    }
}

impl<N> Clone for NodeRef<N> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<N> Default for NodeRef<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: core::fmt::Debug> core::fmt::Debug for NodeRef<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("NodeRef").field(&self.0.borrow()).finish()
    }
}
