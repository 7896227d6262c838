// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::rc::Rc;
use std::time::Duration;

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use understory_transition::{Keyed, LazyList, ManualTimers, Transition, TransitionOptions};

#[derive(Clone, Debug)]
struct Row(u32);

impl Keyed for Row {
    type Key = u32;

    fn key(&self) -> u32 {
        self.0
    }
}

fn bench_toggle(c: &mut Criterion) {
    let mut group = c.benchmark_group("transition");
    group.bench_function("toggle_reverse_x1000", |b| {
        b.iter_batched(
            || {
                let timers = Rc::new(ManualTimers::new());
                let t = Transition::new(Rc::clone(&timers), false, TransitionOptions::default());
                (timers, t)
            },
            |(timers, t)| {
                for i in 0..1000 {
                    t.set_shown(i % 2 == 0);
                    timers.advance(Duration::from_millis(10));
                }
                black_box(t.phase());
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("lazy_list_drain_256", |b| {
        b.iter_batched(
            || {
                let timers = Rc::new(ManualTimers::new());
                let list = LazyList::new(Rc::clone(&timers), (0..256).map(Row));
                (timers, list)
            },
            |(timers, list)| {
                while list.remove_first_available(false).is_some() {}
                timers.advance(LazyList::<Row, ManualTimers>::DEFAULT_TIMEOUT);
                black_box(list.len());
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_toggle);
criterion_main!(benches);
