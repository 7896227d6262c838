// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition phases.
//!
//! Shows a fade, reverses it halfway, and lets it settle. Phase changes are printed as the
//! class list a renderer would apply.
//!
//! Run:
//! - `cargo run -p understory_demos --example transition_phases`

use std::rc::{Rc, Weak};
use std::time::Duration;

use understory_transition::{ManualTimers, Transition, TransitionOptions};

fn main() {
    let timers = Rc::new(ManualTimers::new());
    let fade = Rc::new(Transition::new(
        Rc::clone(&timers),
        false,
        TransitionOptions {
            duration: Duration::from_millis(200),
            unmount_on_exit: true,
        },
    ));

    let weak: Weak<Transition<ManualTimers>> = Rc::downgrade(&fade);
    let clock = Rc::clone(&timers);
    fade.set_on_phase_change(move |phase| {
        let Some(fade) = weak.upgrade() else { return };
        let rendered = fade.render(|_| fade.class_name_for("fade"));
        println!("{:?} {phase} -> {rendered:?}", clock.now());
    });

    fade.set_shown(true);
    timers.advance(Duration::from_millis(100));
    fade.set_shown(false);
    timers.advance(Duration::from_millis(50));
    fade.set_shown(true);
    timers.advance(Duration::from_millis(500));
    fade.set_shown(false);
    timers.advance(Duration::from_millis(500));
}
