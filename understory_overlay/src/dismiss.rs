// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outside-click detection.
//!
//! [`ClickOutside`] listens for document clicks in the capture phase, so it sees a click before
//! inner handlers can stop its propagation. A click whose target is not inside the root node
//! fires the callback once.
//!
//! - A missing or detached target counts as outside.
//! - While the root slot is empty nothing fires.

use alloc::rc::Rc;

use crate::host::{
    Element, Event, EventKind, EventSource, EventTarget, ListenerId, ListenerOptions, NodeRef,
};

/// Returns true if a click on `target` lies outside `root`.
pub fn is_outside<N: Element>(root: &N, target: Option<&N>) -> bool {
    !target.is_some_and(|t| root.contains(t))
}

/// A registered outside-click listener. Detaches on drop.
pub struct ClickOutside<S: EventSource> {
    source: Rc<S>,
    listener: Option<ListenerId>,
}

impl<S: EventSource> core::fmt::Debug for ClickOutside<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ClickOutside")
            .field("listener", &self.listener)
            .finish_non_exhaustive()
    }
}

impl<S: EventSource + 'static> ClickOutside<S> {
    /// Invoke `on_outside` for every click outside the node currently held by `root`.
    pub fn attach(source: &Rc<S>, root: NodeRef<S::Node>, on_outside: Rc<dyn Fn()>) -> Self {
        let listener = source.add_listener(
            EventTarget::Document,
            EventKind::Click,
            ListenerOptions::CAPTURE,
            Rc::new(move |event: &Event<'_, S::Node>| {
                let Some(root) = root.get() else {
                    return;
                };
                if is_outside(&root, event.target) {
                    on_outside();
                }
            }),
        );
        Self {
            source: Rc::clone(source),
            listener: Some(listener),
        }
    }
}

impl<S: EventSource> ClickOutside<S> {
    /// Remove the listener. Calling this more than once is a no-op.
    pub fn detach(&mut self) {
        if let Some(id) = self.listener.take() {
            self.source.remove_listener(id);
        }
    }

    /// Returns true until [`detach`](Self::detach) has run.
    pub fn is_attached(&self) -> bool {
        self.listener.is_some()
    }
}

impl<S: EventSource> Drop for ClickOutside<S> {
    fn drop(&mut self) {
        self.detach();
    }
}
