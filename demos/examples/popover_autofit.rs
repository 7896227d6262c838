// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Popover auto-fit.
//!
//! A popover prefers the top side of its anchor. As the page scrolls the anchor towards the top
//! edge, the popover falls back to the bottom; an outside click asks the owner to close it.
//!
//! Run:
//! - `cargo run -p understory_demos --example popover_autofit`

use std::cell::Cell;
use std::rc::Rc;

use kurbo::{Rect, Size, Vec2};
use understory_overlay::sim::{SimHost, SimNode};
use understory_overlay::{NodeRef, Overlay, OverlayOptions, Placement, PositioningMode};

fn main() {
    let host = Rc::new(SimHost::new(Size::new(640.0, 480.0)));
    let page = SimNode::new(Rect::new(0.0, 0.0, 640.0, 2000.0));
    let button = SimNode::child_of(&page, Rect::new(280.0, 300.0, 360.0, 330.0));
    let tooltip = SimNode::new(Rect::new(0.0, 0.0, 160.0, 48.0));

    let mut overlay = Overlay::new(
        Rc::clone(&host),
        NodeRef::with(button.clone()),
        NodeRef::with(tooltip),
        OverlayOptions {
            prefer_placement: Placement::Top,
            auto_position: true,
            mode: PositioningMode::Document,
            class_name: "tooltip".into(),
            header: Some("Shortcuts".into()),
            ..Default::default()
        },
    );
    overlay.set_on_layout_change(|layout| {
        println!("  layout -> {} ({})", layout.chosen, layout.style());
    });
    let close_requested = Rc::new(Cell::new(false));
    let flag = Rc::clone(&close_requested);
    overlay.set_on_close(move || flag.set(true));

    println!("show");
    overlay.set_visible(true);

    // Scroll the page; the sim host keeps bounding boxes viewport-relative, so move the anchor.
    for scroll in [100.0, 200.0, 260.0, 300.0] {
        println!("scroll to {scroll}");
        button.set_rect(Rect::new(280.0, 300.0 - scroll, 360.0, 330.0 - scroll));
        host.scroll_window_to(Vec2::new(0.0, scroll));
    }

    if let Some(view) = overlay.view() {
        println!("class=\"{}\" header={:?}", view.class_name, view.header);
    }

    host.click(&page);
    if close_requested.get() {
        println!("outside click: closing");
        overlay.set_visible(false);
    }
    println!("listeners left: {}", host.listener_count());
}
