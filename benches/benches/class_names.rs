// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use understory_class_names::{ClassName, parse_class_names};

fn popover_classes(i: usize) -> ClassName<'static> {
    ClassName::list([
        ClassName::map([("popover--visible", true), ("popover--static", i % 3 == 0)]),
        ClassName::from(format!("popover--{}", ["top", "bottom", "left", "right"][i % 4])),
        ClassName::from("  menu  "),
        ClassName::None,
        ClassName::from("popover"),
    ])
}

fn nested(depth: usize) -> ClassName<'static> {
    (0..depth).fold(ClassName::from("leaf"), |inner, d| {
        ClassName::list([inner, ClassName::from(format!("level-{d}"))])
    })
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_class_names");
    let flat: Vec<_> = (0..256).map(popover_classes).collect();
    group.bench_function("popover_x256", |b| {
        b.iter(|| {
            for class in &flat {
                black_box(parse_class_names(black_box(class)));
            }
        });
    });
    for depth in [4, 32] {
        let class = nested(depth);
        group.bench_function(format!("nested_depth{depth}"), |b| {
            b.iter(|| black_box(parse_class_names(black_box(&class))));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
