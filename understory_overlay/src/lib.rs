// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Overlay: Kurbo-native positioning for popovers, tooltips, and menus.
//!
//! An overlay is a floating element attached to an anchor element.
//! This crate decides where it goes and keeps it there:
//!
//! - [`resolve`] places the floating box on one side of the anchor, centered on the cross axis,
//!   optionally falling back to other sides when the preferred one leaves the viewport.
//! - [`reflow::attach`] re-runs layout on window resize, window scroll, and scroll-container scroll.
//! - [`ClickOutside`] reports clicks that land outside the overlay.
//! - [`Overlay`] ties these together behind a single `visible` flag owned by the caller.
//!
//! ## Not a renderer
//!
//! Nothing here touches a DOM or a scene graph. Hosts implement [`Element`], [`Viewport`], and
//! [`EventSource`]; the crate reads bounding boxes through them and hands back a
//! [`PositionStyle`] (or a full [`OverlayView`]) for the rendering layer to apply.
//! The [`sim`] module provides a headless host for tests and demos.
//!
//! ## Coordinates
//!
//! Bounding boxes are viewport-relative. [`PositioningMode::Sticky`] keeps the result in viewport
//! space (`position: fixed`); [`PositioningMode::Document`] adds the window scroll offset
//! (`position: absolute`). Results are floored to whole pixels.
//!
//! ## API overview
//!
//! - [`Placement`], [`CandidateOrder`], [`PlacementRequest`], [`PlacementResult`]: pure placement.
//! - [`ReflowTriggers`], [`ReflowHandle`]: reflow scheduling.
//! - [`Overlay`], [`OverlayOptions`], [`OverlayView`]: the controller.
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//!
//! use kurbo::{Rect, Size, Vec2};
//! use understory_overlay::sim::{SimHost, SimNode};
//! use understory_overlay::{NodeRef, Overlay, OverlayOptions, Placement, Translate};
//!
//! let host = Rc::new(SimHost::new(Size::new(800.0, 600.0)));
//! let anchor = SimNode::new(Rect::new(50.0, 100.0, 150.0, 130.0));
//! let floating = SimNode::new(Rect::new(0.0, 0.0, 40.0, 20.0));
//!
//! let mut overlay = Overlay::new(
//!     Rc::clone(&host),
//!     NodeRef::with(anchor),
//!     NodeRef::with(floating),
//!     OverlayOptions::default(),
//! );
//! overlay.set_visible(true);
//!
//! let view = overlay.view().unwrap();
//! assert_eq!(view.placement, Placement::Bottom);
//! assert_eq!(
//!     view.style.unwrap().to_string(),
//!     "position: absolute; transform: translate3d(80px, 130px, 0px);"
//! );
//!
//! // Document mode follows the page scroll.
//! host.scroll_window_to(Vec2::new(0.0, 40.0));
//! assert_eq!(overlay.layout().unwrap().translate, Translate::new(80, 170));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod dismiss;
pub mod host;
pub mod overlay;
pub mod placement;
pub mod reflow;
pub mod sim;
pub mod style;
pub mod types;
pub mod viewport;

pub use dismiss::{ClickOutside, is_outside};
pub use host::{
    Element, Event, EventKind, EventSource, EventTarget, Host, Listener, ListenerId,
    ListenerOptions, NodeRef, Viewport,
};
pub use overlay::{Mount, Overlay, OverlayOptions, OverlayView};
pub use placement::{candidate_order, placement_origin, resolve};
pub use reflow::{ReflowHandle, ReflowTriggers};
pub use style::{CssPosition, PositionStyle};
pub use types::{
    CandidateOrder, Placement, PlacementError, PlacementRequest, PlacementResult,
    PositioningMode, Translate,
};
pub use viewport::{ViewportState, is_fully_visible, is_in_viewport};
