// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Store: shared state with an after-update hook and typed lenses.
//!
//! A [`Store`] holds one value behind a cheap, cloneable handle.
//!
//! - [`Store::set`] and [`Store::update`] replace the value and then run the after-update
//!   callback with an [`AfterUpdate`] holding the new and previous values.
//! - The callback receives the store itself, so it can write back without holding a clone.
//!   Writes it makes are reported, in order, once it returns.
//! - [`Store::lens`] focuses on a nested field. A [`Lens`] reads and writes that field through
//!   the store, so the callback still sees whole-store snapshots. Lenses compose with
//!   [`Lens::lens`] to reach deeper fields.
//!
//! ```
//! use understory_store::Store;
//!
//! #[derive(Clone, Debug, Default, PartialEq)]
//! struct Settings {
//!     theme: Theme,
//! }
//!
//! #[derive(Clone, Debug, Default, PartialEq)]
//! struct Theme {
//!     dark: bool,
//!     accent: String,
//! }
//!
//! let store = Store::new(Settings::default());
//! let theme = store.lens(|s| &s.theme, |s| &mut s.theme);
//! let dark = theme.lens(|t| &t.dark, |t| &mut t.dark);
//!
//! dark.update(|on| !on);
//! assert!(store.with(|s| s.theme.dark));
//! assert_eq!(theme.get().accent, "");
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

/// Snapshot passed to the after-update callback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AfterUpdate<S> {
    /// Value after the update.
    pub store: S,
    /// Value before the update.
    pub prev_store: S,
}

type AfterUpdateCallback<S> = Box<dyn FnMut(&Store<S>, &AfterUpdate<S>)>;

struct Inner<S> {
    state: RefCell<S>,
    after_update: RefCell<Option<AfterUpdateCallback<S>>>,
    queued: RefCell<VecDeque<AfterUpdate<S>>>,
    notifying: Cell<bool>,
}

/// A shared value. Clones refer to the same value.
pub struct Store<S> {
    inner: Rc<Inner<S>>,
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: core::fmt::Debug> core::fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Store")
            .field("state", &*self.inner.state.borrow())
            .field("after_update", &self.inner.after_update.borrow().is_some())
            .finish()
    }
}

impl<S: Clone + 'static> Store<S> {
    /// A store holding `state`.
    pub fn new(state: S) -> Self {
        Self {
            inner: Rc::new(Inner {
                state: RefCell::new(state),
                after_update: RefCell::new(None),
                queued: RefCell::new(VecDeque::new()),
                notifying: Cell::new(false),
            }),
        }
    }

    /// A store holding `state` that calls `f` after every update.
    pub fn with_after_update(
        state: S,
        f: impl FnMut(&Self, &AfterUpdate<S>) + 'static,
    ) -> Self {
        let store = Self::new(state);
        store.set_after_update(f);
        store
    }

    /// Replace the after-update callback.
    ///
    /// `f` is passed this store. Capturing a clone of the store instead keeps it alive through
    /// its own callback, so the value is never freed.
    pub fn set_after_update(&self, f: impl FnMut(&Self, &AfterUpdate<S>) + 'static) {
        *self.inner.after_update.borrow_mut() = Some(Box::new(f));
    }

    /// A clone of the current value.
    pub fn get(&self) -> S {
        self.inner.state.borrow().clone()
    }

    /// Borrow the current value for the duration of `f`.
    pub fn with<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&*self.inner.state.borrow())
    }

    /// Replace the value.
    pub fn set(&self, next: S) {
        let prev = self.inner.state.replace(next);
        self.after_update(prev);
    }

    /// Replace the value with `f(previous)`.
    pub fn update(&self, f: impl FnOnce(&S) -> S) {
        let next = self.with(f);
        self.set(next);
    }

    /// Mutate the value in place.
    pub fn modify(&self, f: impl FnOnce(&mut S)) {
        let prev = self.get();
        f(&mut *self.inner.state.borrow_mut());
        self.after_update(prev);
    }

    /// A lens onto the field reached by `get` and `get_mut`.
    pub fn lens<T: 'static>(
        &self,
        get: impl Fn(&S) -> &T + 'static,
        get_mut: impl Fn(&mut S) -> &mut T + 'static,
    ) -> Lens<S, T> {
        Lens {
            store: self.clone(),
            get: getter(get),
            get_mut: getter_mut(get_mut),
        }
    }

    fn after_update(&self, prev_store: S) {
        if !self.inner.notifying.get() && self.inner.after_update.borrow().is_none() {
            return;
        }
        self.inner.queued.borrow_mut().push_back(AfterUpdate {
            store: self.get(),
            prev_store,
        });
        // Updates made by the callback are snapshotted now and delivered by the outermost call.
        if self.inner.notifying.replace(true) {
            return;
        }
        loop {
            let next = self.inner.queued.borrow_mut().pop_front();
            let Some(update) = next else {
                break;
            };
            let cb = self.inner.after_update.borrow_mut().take();
            if let Some(mut cb) = cb {
                cb(self, &update);
                let mut slot = self.inner.after_update.borrow_mut();
                if slot.is_none() {
                    *slot = Some(cb);
                }
            }
        }
        self.inner.notifying.set(false);
    }
}

type Getter<S, T> = Rc<dyn Fn(&S) -> &T>;
type GetterMut<S, T> = Rc<dyn Fn(&mut S) -> &mut T>;

fn getter<S, T>(f: impl Fn(&S) -> &T + 'static) -> Getter<S, T> {
    Rc::new(f)
}

fn getter_mut<S, T>(f: impl Fn(&mut S) -> &mut T + 'static) -> GetterMut<S, T> {
    Rc::new(f)
}

/// A typed view of one field of a [`Store`].
pub struct Lens<S, T> {
    store: Store<S>,
    get: Getter<S, T>,
    get_mut: GetterMut<S, T>,
}

impl<S, T> Clone for Lens<S, T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            get: Rc::clone(&self.get),
            get_mut: Rc::clone(&self.get_mut),
        }
    }
}

impl<S, T: core::fmt::Debug> core::fmt::Debug for Lens<S, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = self.store.inner.state.borrow();
        f.debug_struct("Lens")
            .field("value", (self.get)(&*state))
            .finish_non_exhaustive()
    }
}

impl<S: Clone + 'static, T: 'static> Lens<S, T> {
    /// Borrow the field for the duration of `f`.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.store.with(|s| f((self.get)(s)))
    }

    /// Replace the field.
    pub fn set(&self, value: T) {
        self.store.modify(|s| *(self.get_mut)(s) = value);
    }

    /// Replace the field with `f(previous)`.
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let next = self.with(f);
        self.set(next);
    }

    /// The store this lens reads from.
    pub fn store(&self) -> &Store<S> {
        &self.store
    }

    /// A lens onto a field of this lens's field.
    pub fn lens<U: 'static>(
        &self,
        get: impl Fn(&T) -> &U + 'static,
        get_mut: impl Fn(&mut T) -> &mut U + 'static,
    ) -> Lens<S, U> {
        let (outer, outer_mut) = (Rc::clone(&self.get), Rc::clone(&self.get_mut));
        Lens {
            store: self.store.clone(),
            get: getter(move |s| get(outer(s))),
            get_mut: getter_mut(move |s| get_mut(outer_mut(s))),
        }
    }
}

impl<S: Clone + 'static, T: Clone + 'static> Lens<S, T> {
    /// A clone of the field.
    pub fn get(&self) -> T {
        self.with(T::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct App {
        count: u32,
        user: User,
    }

    #[derive(Clone, Debug, Default, PartialEq)]
    struct User {
        name: Option<&'static str>,
        tags: Vec<&'static str>,
    }

    fn recorded() -> (Store<App>, Rc<RefCell<Vec<AfterUpdate<App>>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let l = Rc::clone(&log);
        let store = Store::with_after_update(App::default(), move |_, u| l.borrow_mut().push(u.clone()));
        (store, log)
    }

    #[test]
    fn set_and_update_report_previous_value() {
        let (store, log) = recorded();
        store.update(|a| App {
            count: a.count + 1,
            ..a.clone()
        });
        store.set(App::default());
        let log = log.borrow();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].prev_store.count, 0);
        assert_eq!(log[0].store.count, 1);
        assert_eq!(log[1].prev_store.count, 1);
        assert_eq!(log[1].store.count, 0);
    }

    #[test]
    fn clones_share_state() {
        let store = Store::new(1_u8);
        let other = store.clone();
        other.set(2);
        assert_eq!(store.get(), 2);
    }

    #[test]
    fn lens_writes_through_to_the_store() {
        let (store, log) = recorded();
        let user = store.lens(|a| &a.user, |a| &mut a.user);
        let name = user.lens(|u| &u.name, |u| &mut u.name);
        name.set(Some("ada"));
        assert_eq!(store.get().user.name, Some("ada"));
        assert_eq!(log.borrow()[0].prev_store.user.name, None);

        let tags = user.lens(|u| &u.tags, |u| &mut u.tags);
        tags.update(|t| {
            let mut t = t.clone();
            t.push("admin");
            t
        });
        assert_eq!(user.get().tags, vec!["admin"]);
        assert_eq!(log.borrow().len(), 2);
        assert_eq!(tags.with(Vec::len), 1);
    }

    #[test]
    fn callback_may_update_the_store() {
        let store = Store::new(0_u32);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        store.set_after_update(move |store, u| {
            s.borrow_mut().push(u.clone());
            if u.store > 10 {
                store.set(10);
            }
        });
        store.set(42);
        assert_eq!(store.get(), 10);
        assert_eq!(
            *seen.borrow(),
            [
                AfterUpdate {
                    store: 42,
                    prev_store: 0
                },
                AfterUpdate {
                    store: 10,
                    prev_store: 42
                },
            ]
        );
    }

    #[test]
    fn callback_does_not_keep_the_store_alive() {
        let store = Store::with_after_update(0_u32, |store, u| {
            if u.store % 2 == 1 {
                store.update(|n| n + 1);
            }
        });
        let weak = Rc::downgrade(&store.inner);
        store.set(3);
        assert_eq!(store.get(), 4);
        drop(store);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn modify_in_place() {
        let (store, log) = recorded();
        store.modify(|a| a.count = 5);
        assert_eq!(store.with(|a| a.count), 5);
        assert_eq!(log.borrow()[0].prev_store.count, 0);
    }
}
