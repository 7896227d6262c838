// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Transition: enter/exit phases for mount and unmount animations.
//!
//! - [`Transition`] drives a four-phase lifecycle (`entering`, `entered`, `exiting`, `exited`)
//!   from a boolean `shown` input and a duration. Reversals are immediate, and pending timers
//!   never outlive the controller.
//! - [`LazyList`] defers removing list items so their exit animation can finish.
//! - [`Timers`] is the host capability both are built on; [`TimerGuard`] ties a scheduled
//!   timer to a scope, and [`ManualTimers`] is a virtual clock for tests.
//!
//! The rendering layer stays outside this crate: it asks [`Transition::render`] or
//! [`Transition::class_name_for`] for the current phase and re-renders from
//! [`Transition::set_on_phase_change`].
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! use understory_transition::{ManualTimers, Phase, Transition, TransitionOptions};
//!
//! let timers = Rc::new(ManualTimers::new());
//! let options = TransitionOptions {
//!     duration: Duration::from_millis(300),
//!     unmount_on_exit: true,
//! };
//! let fade = Transition::new(Rc::clone(&timers), false, options);
//! assert_eq!(fade.render(|phase| phase), None);
//!
//! fade.set_shown(true);
//! assert_eq!(fade.phase(), Phase::Entering);
//!
//! // Hiding before the enter timer fires reverses right away.
//! timers.advance(Duration::from_millis(100));
//! fade.set_shown(false);
//! assert_eq!(fade.phase(), Phase::Exiting);
//!
//! timers.advance(Duration::from_millis(300));
//! assert_eq!(fade.phase(), Phase::Exited);
//! assert_eq!(fade.render(|phase| phase), None);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod lazy_list;
mod phase;
mod timer;
mod transition;

pub use lazy_list::{Keyed, LazyItem, LazyList};
pub use phase::Phase;
pub use timer::{ManualTimers, TimerGuard, TimerId, Timers};
pub use transition::{Transition, TransitionOptions};
