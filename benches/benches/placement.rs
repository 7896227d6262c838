// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::rc::Rc;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size, Vec2};
use understory_overlay::sim::{SimHost, SimNode};
use understory_overlay::{
    NodeRef, Overlay, OverlayOptions, Placement, PlacementRequest, PositioningMode,
    ViewportState, candidate_order, resolve,
};

/// Anchors spread over a grid, some hugging the viewport edges so auto-fit has to fall back.
fn gen_anchors(n: usize, viewport: Size) -> Vec<Rect> {
    let mut out = Vec::with_capacity(n * n);
    let (dx, dy) = (viewport.width / n as f64, viewport.height / n as f64);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * dx;
            let y0 = y as f64 * dy;
            out.push(Rect::new(x0, y0, x0 + 60.0, y0 + 24.0));
        }
    }
    out
}

fn bench_resolve(c: &mut Criterion) {
    let viewport = Size::new(1280.0, 800.0);
    let vp = ViewportState::new(viewport).with_scroll(Vec2::new(0.0, 320.0));
    let floating = Rect::new(0.0, 0.0, 180.0, 120.0);

    let mut group = c.benchmark_group("resolve");
    for &n in &[8_usize, 32] {
        let anchors = gen_anchors(n, viewport);
        group.throughput(Throughput::Elements((n * n) as u64));
        for auto_fit in [false, true] {
            let candidates = candidate_order(Placement::Top, auto_fit);
            group.bench_function(format!("grid_n{n}_auto_fit_{auto_fit}"), |b| {
                b.iter(|| {
                    for &anchor in &anchors {
                        let req = PlacementRequest {
                            anchor,
                            floating,
                            candidates: candidates.clone(),
                            mode: PositioningMode::Document,
                            auto_fit,
                        };
                        black_box(resolve(black_box(&req), &vp));
                    }
                });
            });
        }
    }
    group.finish();
}

fn bench_overlay_reflow(c: &mut Criterion) {
    let mut group = c.benchmark_group("overlay");
    group.bench_function("scroll_reflow_x100", |b| {
        b.iter_batched(
            || {
                let host = Rc::new(SimHost::new(Size::new(1280.0, 800.0)));
                let anchor = SimNode::new(Rect::new(600.0, 20.0, 680.0, 44.0));
                let mut overlay = Overlay::new(
                    Rc::clone(&host),
                    NodeRef::with(anchor.clone()),
                    NodeRef::with(SimNode::new(Rect::new(0.0, 0.0, 180.0, 120.0))),
                    OverlayOptions {
                        prefer_placement: Placement::Top,
                        auto_position: true,
                        ..Default::default()
                    },
                );
                overlay.set_visible(true);
                (host, anchor, overlay)
            },
            |(host, anchor, overlay)| {
                for i in 0..100 {
                    let y = f64::from(i) * 4.0;
                    anchor.set_rect(Rect::new(600.0, y, 680.0, y + 24.0));
                    host.scroll_window_to(Vec2::new(0.0, y));
                }
                black_box(overlay.layout());
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_resolve, bench_overlay_reflow);
criterion_main!(benches);
