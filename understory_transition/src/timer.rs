// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot timers.
//!
//! Hosts provide timers through [`Timers`]. Library code holds every timer it starts in a
//! [`TimerGuard`], which clears the timer when dropped unless it has been
//! [disarmed](TimerGuard::disarm) after firing.
//!
//! [`ManualTimers`] is a virtual clock for tests and demos: nothing fires until
//! [`ManualTimers::advance`] is called.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};
use core::time::Duration;

/// Identifier of a scheduled timer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Wrap a host-assigned id.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A source of one-shot timers.
pub trait Timers {
    /// Run `callback` once after `delay`.
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerId;

    /// Cancel a pending timer. Unknown or already fired ids are ignored.
    fn clear_timeout(&self, id: TimerId);
}

/// A pending timer that is cleared on drop.
pub struct TimerGuard<T: Timers + ?Sized> {
    timers: Rc<T>,
    id: Option<TimerId>,
}

impl<T: Timers + ?Sized> core::fmt::Debug for TimerGuard<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TimerGuard")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl<T: Timers + ?Sized> TimerGuard<T> {
    /// Start a timer on `timers`.
    pub fn start(timers: &Rc<T>, delay: Duration, callback: impl FnOnce() + 'static) -> Self {
        let id = timers.set_timeout(delay, Box::new(callback));
        Self {
            timers: Rc::clone(timers),
            id: Some(id),
        }
    }

    /// Clear the timer if it is still pending.
    pub fn cancel(&mut self) {
        if let Some(id) = self.id.take() {
            self.timers.clear_timeout(id);
        }
    }

    /// Forget the timer without clearing it. Call this once the timer has fired.
    pub fn disarm(&mut self) {
        self.id = None;
    }

    /// Returns true until the guard is cancelled or disarmed.
    pub fn is_armed(&self) -> bool {
        self.id.is_some()
    }

    /// The guarded timer id, if armed.
    pub fn id(&self) -> Option<TimerId> {
        self.id
    }
}

impl<T: Timers + ?Sized> Drop for TimerGuard<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}

type Callback = Box<dyn FnOnce()>;

/// Timers driven by a virtual clock.
///
/// Timers due at the same instant fire in the order they were scheduled.
pub struct ManualTimers {
    now: Cell<Duration>,
    next_id: Cell<u64>,
    queue: RefCell<BTreeMap<(Duration, TimerId), Callback>>,
}

impl core::fmt::Debug for ManualTimers {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ManualTimers")
            .field("now", &self.now.get())
            .field("pending", &self.pending_count())
            .finish_non_exhaustive()
    }
}

impl Default for ManualTimers {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualTimers {
    /// A clock at zero with nothing scheduled.
    pub fn new() -> Self {
        Self {
            now: Cell::new(Duration::ZERO),
            next_id: Cell::new(1),
            queue: RefCell::new(BTreeMap::new()),
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    /// Number of timers that have not fired or been cleared.
    pub fn pending_count(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Move the clock forward by `by`, firing every timer that falls due, and return how many
    /// fired.
    ///
    /// Callbacks run with the clock set to their due time and may schedule or clear timers;
    /// newly scheduled timers that fall due within the same advance fire too.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now.get() + by;
        let mut fired = 0;
        loop {
            let next = {
                let mut queue = self.queue.borrow_mut();
                let due = queue
                    .first_key_value()
                    .map(|(&key, _)| key)
                    .filter(|(at, _)| *at <= target);
                due.and_then(|key| queue.remove(&key).map(|cb| (key.0, cb)))
            };
            let Some((due, callback)) = next else {
                break;
            };
            self.now.set(due);
            callback();
            fired += 1;
        }
        self.now.set(target);
        fired
    }
}

impl Timers for ManualTimers {
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerId {
        let id = TimerId::new(self.next_id.get());
        self.next_id.set(id.get() + 1);
        self.queue
            .borrow_mut()
            .insert((self.now.get() + delay, id), callback);
        id
    }

    fn clear_timeout(&self, id: TimerId) {
        self.queue.borrow_mut().retain(|(_, t), _| *t != id);
    }
}
