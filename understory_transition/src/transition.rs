// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The transition phase controller.
//!
//! ## Overview
//!
//! [`Transition`] turns a boolean `shown` input into the four [`Phase`]s of an enter/exit
//! animation. Showing moves to [`Phase::Entering`] and starts a timer that settles into
//! [`Phase::Entered`] after [`TransitionOptions::duration`]; hiding does the same through
//! [`Phase::Exiting`] and [`Phase::Exited`].
//!
//! | current    | shown = true            | shown = false          |
//! |------------|-------------------------|------------------------|
//! | `exited`   | `entering`, start timer | no-op                  |
//! | `entering` | no-op                   | `exiting`, start timer |
//! | `entered`  | no-op                   | `exiting`, start timer |
//! | `exiting`  | `entering`, start timer | no-op                  |
//!
//! - Reversal is immediate and cancels the timer of the direction being abandoned.
//! - Repeating the current direction never restarts its timer.
//! - Dropping the controller, or calling [`Transition::teardown`], cancels any pending timer.

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::rc::{Rc, Weak};
use alloc::string::String;
use core::cell::{Cell, RefCell};
use core::time::Duration;

use understory_class_names::{ClassName, parse_class_names};

use crate::phase::Phase;
use crate::timer::{TimerGuard, Timers};

/// Transition configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TransitionOptions {
    /// Time spent in `Entering` or `Exiting` before settling.
    pub duration: Duration,
    /// Render nothing while `Exited`.
    pub unmount_on_exit: bool,
}

impl Default for TransitionOptions {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(2000),
            unmount_on_exit: false,
        }
    }
}

type PhaseCallback = Box<dyn FnMut(Phase)>;

struct State<T: Timers + ?Sized> {
    phase: Phase,
    pending: Option<TimerGuard<T>>,
}

struct Inner<T: Timers + ?Sized> {
    timers: Rc<T>,
    options: TransitionOptions,
    state: RefCell<State<T>>,
    torn_down: Cell<bool>,
    on_change: RefCell<Option<PhaseCallback>>,
    queued: RefCell<VecDeque<Phase>>,
    notifying: Cell<bool>,
}

impl<T: Timers + ?Sized + 'static> Inner<T> {
    fn begin(self: &Rc<Self>, phase: Phase) {
        let weak: Weak<Self> = Rc::downgrade(self);
        let target = phase.settled();
        let guard = TimerGuard::start(&self.timers, self.options.duration, move || {
            if let Some(inner) = weak.upgrade() {
                inner.settle(target);
            }
        });
        let previous = {
            let mut state = self.state.borrow_mut();
            state.phase = phase;
            state.pending.replace(guard)
        };
        // Cancels the timer of the abandoned direction.
        drop(previous);
        log::trace!("transition -> {phase}");
        self.notify(phase);
    }

    fn settle(&self, target: Phase) {
        {
            let mut state = self.state.borrow_mut();
            if state.phase.is_rest() || state.phase.settled() != target {
                return;
            }
            if let Some(mut guard) = state.pending.take() {
                guard.disarm();
            }
            state.phase = target;
        }
        log::trace!("transition -> {target}");
        self.notify(target);
    }

    fn notify(&self, phase: Phase) {
        self.queued.borrow_mut().push_back(phase);
        // Changes made by the callback are queued and delivered by the outermost call, in order.
        if self.notifying.replace(true) {
            return;
        }
        loop {
            let next = self.queued.borrow_mut().pop_front();
            let Some(next) = next else {
                break;
            };
            let cb = self.on_change.borrow_mut().take();
            if let Some(mut cb) = cb {
                cb(next);
                let mut slot = self.on_change.borrow_mut();
                if slot.is_none() {
                    *slot = Some(cb);
                }
            }
        }
        self.notifying.set(false);
    }
}

/// Phase controller for one mount/unmount transition.
pub struct Transition<T: Timers + ?Sized + 'static> {
    inner: Rc<Inner<T>>,
}

impl<T: Timers + ?Sized + 'static> core::fmt::Debug for Transition<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("Transition")
            .field("phase", &state.phase)
            .field("pending", &state.pending)
            .field("options", &self.inner.options)
            .finish_non_exhaustive()
    }
}

impl<T: Timers + ?Sized + 'static> Transition<T> {
    /// Create a controller. Starts in `Entering` (with its timer running) when `shown`, otherwise
    /// in `Exited`.
    pub fn new(timers: Rc<T>, shown: bool, options: TransitionOptions) -> Self {
        let inner = Rc::new(Inner {
            timers,
            options,
            state: RefCell::new(State {
                phase: Phase::Exited,
                pending: None,
            }),
            torn_down: Cell::new(false),
            on_change: RefCell::new(None),
            queued: RefCell::new(VecDeque::new()),
            notifying: Cell::new(false),
        });
        if shown {
            inner.begin(Phase::Entering);
        }
        Self { inner }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.inner.state.borrow().phase
    }

    /// Options this controller was created with.
    pub fn options(&self) -> TransitionOptions {
        self.inner.options
    }

    /// Returns true while a settle timer is pending.
    pub fn is_animating(&self) -> bool {
        self.inner.state.borrow().pending.is_some()
    }

    /// Apply the `shown` input.
    pub fn set_shown(&self, shown: bool) {
        if self.inner.torn_down.get() {
            return;
        }
        let phase = self.phase();
        if shown && !phase.is_enter() {
            self.inner.begin(Phase::Entering);
        } else if !shown && !phase.is_exit() {
            self.inner.begin(Phase::Exiting);
        }
    }

    /// Callback invoked after every phase change, including timer-driven ones.
    ///
    /// The callback may call [`set_shown`](Self::set_shown); the change it causes is reported
    /// after the current call returns.
    pub fn set_on_phase_change(&self, f: impl FnMut(Phase) + 'static) {
        *self.inner.on_change.borrow_mut() = Some(Box::new(f));
    }

    /// Returns false only while `Exited` with [`TransitionOptions::unmount_on_exit`] set.
    pub fn is_mounted(&self) -> bool {
        !(self.inner.options.unmount_on_exit && self.phase() == Phase::Exited)
    }

    /// Render the current phase, or `None` when unmounted.
    pub fn render<R>(&self, f: impl FnOnce(Phase) -> R) -> Option<R> {
        self.is_mounted().then(|| f(self.phase()))
    }

    /// Append the current phase name to a child's class list.
    ///
    /// ```
    /// use std::rc::Rc;
    /// use understory_transition::{ManualTimers, Transition, TransitionOptions};
    ///
    /// let t = Transition::new(Rc::new(ManualTimers::new()), true, TransitionOptions::default());
    /// assert_eq!(t.class_name_for("fade"), "fade entering");
    /// ```
    pub fn class_name_for<'a>(&self, base: impl Into<ClassName<'a>>) -> String {
        parse_class_names(&ClassName::list([
            base.into(),
            ClassName::from(self.phase().as_str()),
        ]))
    }

    /// Cancel any pending timer and ignore further input. The phase stays where it is.
    pub fn teardown(&self) {
        self.inner.torn_down.set(true);
        let pending = self.inner.state.borrow_mut().pending.take();
        drop(pending);
    }
}
