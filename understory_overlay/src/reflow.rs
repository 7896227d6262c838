// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reflow scheduling: re-run a layout callback whenever the viewport moves.
//!
//! [`attach`] registers one callback on window resize, window scroll, and optionally a scroll
//! container, runs it once immediately, and returns a [`ReflowHandle`]. Dropping the handle
//! (or calling [`ReflowHandle::detach`]) removes exactly the listeners that call registered.
//!
//! There is no batching: every qualifying event produces one synchronous callback.

use alloc::rc::Rc;
use alloc::vec::Vec;

use bitflags::bitflags;

use crate::host::{Event, EventKind, EventSource, EventTarget, ListenerId, ListenerOptions};

bitflags! {
    /// Events that trigger a reflow.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ReflowTriggers: u8 {
        /// Window resize.
        const WINDOW_RESIZE    = 0b0000_0001;
        /// Window (document) scroll.
        const WINDOW_SCROLL    = 0b0000_0010;
        /// Scroll of the scroll container, when one is given.
        const CONTAINER_SCROLL = 0b0000_0100;
    }
}

impl Default for ReflowTriggers {
    fn default() -> Self {
        Self::all()
    }
}

/// Listeners registered by one [`attach`] call.
///
/// Detaches on drop.
pub struct ReflowHandle<S: EventSource> {
    source: Rc<S>,
    listeners: Vec<ListenerId>,
}

impl<S: EventSource> core::fmt::Debug for ReflowHandle<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReflowHandle")
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

impl<S: EventSource> ReflowHandle<S> {
    /// Remove the listeners. Calling this more than once is a no-op.
    pub fn detach(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        for id in self.listeners.drain(..) {
            self.source.remove_listener(id);
        }
        log::debug!("reflow listeners detached");
    }

    /// Returns true until [`detach`](Self::detach) has run.
    pub fn is_attached(&self) -> bool {
        !self.listeners.is_empty()
    }

    /// Listener ids registered by this handle.
    pub fn listeners(&self) -> &[ListenerId] {
        &self.listeners
    }
}

impl<S: EventSource> Drop for ReflowHandle<S> {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Register `on_reflow` for the selected `triggers` and invoke it once.
///
/// `container` is only listened to when `triggers` contains
/// [`ReflowTriggers::CONTAINER_SCROLL`]. The scheduler keeps no state between calls; to follow a
/// different container, drop the handle and attach again.
pub fn attach<S: EventSource + 'static>(
    source: &Rc<S>,
    triggers: ReflowTriggers,
    container: Option<&S::Node>,
    on_reflow: Rc<dyn Fn()>,
) -> ReflowHandle<S> {
    let mut listeners = Vec::with_capacity(3);
    let mut listen = |target: EventTarget<S::Node>, kind: EventKind| {
        let f = Rc::clone(&on_reflow);
        let id = source.add_listener(
            target,
            kind,
            ListenerOptions::default(),
            Rc::new(move |_: &Event<'_, S::Node>| f()),
        );
        listeners.push(id);
    };

    if triggers.contains(ReflowTriggers::WINDOW_RESIZE) {
        listen(EventTarget::Window, EventKind::Resize);
    }
    if triggers.contains(ReflowTriggers::WINDOW_SCROLL) {
        listen(EventTarget::Window, EventKind::Scroll);
    }
    if let Some(container) = container
        && triggers.contains(ReflowTriggers::CONTAINER_SCROLL)
    {
        listen(EventTarget::Node(container.clone()), EventKind::Scroll);
    }
    log::debug!("reflow attached with {} listeners", listeners.len());

    on_reflow();
    ReflowHandle {
        source: Rc::clone(source),
        listeners,
    }
}
