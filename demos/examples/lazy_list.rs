// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lazily removed toasts.
//!
//! Dismissed toasts stay in the list, marked `removed`, until their exit animation has had
//! time to run. Toast counts live in a store.
//!
//! Run:
//! - `cargo run -p understory_demos --example lazy_list`

use std::rc::Rc;
use std::time::Duration;

use understory_class_names::{ClassName, parse_class_names};
use understory_store::Store;
use understory_transition::{Keyed, LazyList, ManualTimers};

#[derive(Clone, Debug)]
struct Toast {
    id: u32,
    text: &'static str,
}

impl Keyed for Toast {
    type Key = u32;

    fn key(&self) -> u32 {
        self.id
    }
}

#[derive(Clone, Debug, Default)]
struct Stats {
    shown: u32,
    dismissed: u32,
}

fn render(list: &LazyList<Toast, ManualTimers>) {
    for item in list.items().iter() {
        let class = parse_class_names(&ClassName::list([
            ClassName::from("toast"),
            ClassName::map([("toast--leaving", item.removed)]),
        ]));
        println!("  [{class}] {}", item.data.text);
    }
}

fn main() {
    let timers = Rc::new(ManualTimers::new());
    let stats = Store::with_after_update(Stats::default(), |_, u| {
        println!("  stats: {:?} -> {:?}", u.prev_store, u.store);
    });
    let shown = stats.lens(|s| &s.shown, |s| &mut s.shown);
    let dismissed = stats.lens(|s| &s.dismissed, |s| &mut s.dismissed);

    let list = LazyList::with_timeout(
        Rc::clone(&timers),
        [
            Toast { id: 1, text: "Saved" },
            Toast { id: 2, text: "Synced" },
        ],
        Duration::from_millis(300),
    );
    shown.set(2);

    list.append(Toast { id: 3, text: "Uploaded" });
    shown.update(|n| n + 1);
    render(&list);

    println!("dismiss oldest");
    if list.remove_first_available(false).is_some() {
        dismissed.update(|n| n + 1);
    }
    render(&list);

    println!("dismiss newest immediately");
    if list.remove_last_available(true).is_some() {
        dismissed.update(|n| n + 1);
    }
    render(&list);

    println!("after 300ms");
    timers.advance(Duration::from_millis(300));
    render(&list);
}
