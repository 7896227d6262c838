// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A list whose removals are deferred so exit animations can play.
//!
//! [`LazyList::remove`] first marks an item [`removed`](LazyItem::removed) and only drops it
//! after a timeout. Immediate removal skips the mark. Dropping the list cancels every pending
//! removal.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Cell, Ref, RefCell};
use core::time::Duration;

use crate::timer::{TimerGuard, Timers};

/// Items with a stable identity.
pub trait Keyed {
    /// Identity type.
    type Key: PartialEq + Clone + 'static;

    /// This item's key.
    fn key(&self) -> Self::Key;
}

/// A list entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LazyItem<T> {
    /// The item.
    pub data: T,
    /// Set while the item waits for its deferred removal.
    pub removed: bool,
}

impl<T> LazyItem<T> {
    fn new(data: T) -> Self {
        Self {
            data,
            removed: false,
        }
    }
}

type ChangeCallback = Box<dyn FnMut()>;

struct Inner<T: Keyed, M: Timers + ?Sized> {
    timers: Rc<M>,
    timeout: Duration,
    items: RefCell<Vec<LazyItem<T>>>,
    pending: RefCell<Vec<(T::Key, TimerGuard<M>)>>,
    on_change: RefCell<Option<ChangeCallback>>,
    queued: Cell<usize>,
    notifying: Cell<bool>,
}

impl<T: Keyed + 'static, M: Timers + ?Sized + 'static> Inner<T, M> {
    /// Drop every item with `key` along with its pending removals.
    fn purge(&self, key: &T::Key) -> bool {
        let removed = {
            let mut items = self.items.borrow_mut();
            let before = items.len();
            items.retain(|item| item.data.key() != *key);
            items.len() != before
        };
        let stale: Vec<_> = {
            let mut pending = self.pending.borrow_mut();
            let (stale, keep) = core::mem::take(&mut *pending)
                .into_iter()
                .partition(|(k, _)| k == key);
            *pending = keep;
            stale
        };
        drop(stale);
        removed
    }

    fn notify(&self) {
        self.queued.set(self.queued.get() + 1);
        // Changes made by the callback are delivered by the outermost call, one call each.
        if self.notifying.replace(true) {
            return;
        }
        while self.queued.get() > 0 {
            self.queued.set(self.queued.get() - 1);
            let cb = self.on_change.borrow_mut().take();
            if let Some(mut cb) = cb {
                cb();
                let mut slot = self.on_change.borrow_mut();
                if slot.is_none() {
                    *slot = Some(cb);
                }
            }
        }
        self.notifying.set(false);
    }
}

/// A keyed list with deferred removal.
pub struct LazyList<T: Keyed + 'static, M: Timers + ?Sized + 'static> {
    inner: Rc<Inner<T, M>>,
}

impl<T, M> core::fmt::Debug for LazyList<T, M>
where
    T: Keyed + core::fmt::Debug + 'static,
    M: Timers + ?Sized + 'static,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LazyList")
            .field("items", &*self.inner.items.borrow())
            .field("pending", &self.inner.pending.borrow().len())
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

impl<T: Keyed + 'static, M: Timers + ?Sized + 'static> LazyList<T, M> {
    /// Default delay between marking an item removed and dropping it.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

    /// A list of `initial` items with the default timeout.
    pub fn new(timers: Rc<M>, initial: impl IntoIterator<Item = T>) -> Self {
        Self::with_timeout(timers, initial, Self::DEFAULT_TIMEOUT)
    }

    /// A list of `initial` items with a custom timeout.
    pub fn with_timeout(
        timers: Rc<M>,
        initial: impl IntoIterator<Item = T>,
        timeout: Duration,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                timers,
                timeout,
                items: RefCell::new(initial.into_iter().map(LazyItem::new).collect()),
                pending: RefCell::new(Vec::new()),
                on_change: RefCell::new(None),
                queued: Cell::new(0),
                notifying: Cell::new(false),
            }),
        }
    }

    /// Current entries, including those marked removed.
    pub fn items(&self) -> Ref<'_, [LazyItem<T>]> {
        Ref::map(self.inner.items.borrow(), Vec::as_slice)
    }

    /// Number of entries, including those marked removed.
    pub fn len(&self) -> usize {
        self.inner.items.borrow().len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.items.borrow().is_empty()
    }

    /// Number of removals waiting for their timeout.
    pub fn pending_count(&self) -> usize {
        self.inner.pending.borrow().len()
    }

    /// Callback invoked after every change, including deferred removals.
    ///
    /// Changes the callback makes to the list are reported by further calls once it returns.
    pub fn set_on_change(&self, f: impl FnMut() + 'static) {
        *self.inner.on_change.borrow_mut() = Some(Box::new(f));
    }

    /// Remove the items with `key`.
    ///
    /// With `immediate` they are dropped now, cancelling any removal already pending for `key`.
    /// Otherwise items not yet marked are marked removed and dropped after the timeout.
    /// Returns true if anything changed.
    pub fn remove(&self, key: &T::Key, immediate: bool) -> bool {
        let changed = if immediate {
            self.inner.purge(key)
        } else {
            self.mark(key)
        };
        if changed {
            self.inner.notify();
        }
        changed
    }

    fn mark(&self, key: &T::Key) -> bool {
        let found = {
            let mut found = false;
            for item in self.inner.items.borrow_mut().iter_mut() {
                if !item.removed && item.data.key() == *key {
                    item.removed = true;
                    found = true;
                }
            }
            found
        };
        if found {
            let weak: Weak<Inner<T, M>> = Rc::downgrade(&self.inner);
            let k = key.clone();
            let guard = TimerGuard::start(&self.inner.timers, self.inner.timeout, move || {
                if let Some(inner) = weak.upgrade()
                    && inner.purge(&k)
                {
                    inner.notify();
                }
            });
            self.inner.pending.borrow_mut().push((key.clone(), guard));
        }
        found
    }

    /// Remove the first item not already being removed. Returns its key.
    pub fn remove_first_available(&self, immediate: bool) -> Option<T::Key> {
        let key = self
            .inner
            .items
            .borrow()
            .iter()
            .find(|item| !item.removed)
            .map(|item| item.data.key())?;
        self.remove(&key, immediate);
        Some(key)
    }

    /// Remove the last item not already being removed. Returns its key.
    pub fn remove_last_available(&self, immediate: bool) -> Option<T::Key> {
        let key = self
            .inner
            .items
            .borrow()
            .iter()
            .rfind(|item| !item.removed)
            .map(|item| item.data.key())?;
        self.remove(&key, immediate);
        Some(key)
    }

    /// Add an item at the end.
    pub fn append(&self, data: T) {
        self.inner.items.borrow_mut().push(LazyItem::new(data));
        self.inner.notify();
    }

    /// Add an item at the front.
    pub fn prepend(&self, data: T) {
        self.inner.items.borrow_mut().insert(0, LazyItem::new(data));
        self.inner.notify();
    }
}
