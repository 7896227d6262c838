// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The overlay controller.
//!
//! ## Overview
//!
//! [`Overlay`] keeps a floating element attached to an anchor while an externally owned
//! `visible` flag is set:
//!
//! - Becoming visible measures anchor and floating element, resolves a placement, and attaches
//!   a [reflow scheduler](crate::reflow) and an [outside-click listener](crate::dismiss).
//! - Each reflow re-measures and re-resolves. The layout is replaced, and the layout-change
//!   callback fired, only when the result differs.
//! - Becoming hidden releases every listener and forgets the layout.
//!
//! If the anchor or floating element is not mounted when a reflow runs, that reflow is skipped
//! and the next event retries. A reflow started from inside another reflow of the same overlay
//! (for example a resize caused by applying the new style) is ignored.
//!
//! ## Static layout
//!
//! With [`OverlayOptions::static_layout`] the overlay renders inline with no position style.
//! No placement is computed, no reflow listeners are attached, and the portal is never asked
//! for a mount target. Outside-click dismissal still applies.

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::{Rc, Weak};
use alloc::string::String;
use core::cell::{Cell, Ref, RefCell};

use understory_class_names::{ClassName, parse_class_names};

use crate::dismiss::ClickOutside;
use crate::host::{Element, Host, NodeRef};
use crate::placement::{candidate_order, resolve};
use crate::reflow::{self, ReflowHandle, ReflowTriggers};
use crate::style::PositionStyle;
use crate::types::{CandidateOrder, Placement, PlacementRequest, PlacementResult, PositioningMode};

/// Base class applied to every overlay.
pub const CLASS_BASE: &str = "popover";

/// Overlay configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlayOptions {
    /// Placement tried first.
    pub prefer_placement: Placement,
    /// Fall back to other sides when the preferred one leaves the viewport.
    pub auto_position: bool,
    /// Coordinate space of the computed style.
    pub mode: PositioningMode,
    /// Render inline without any positioning.
    pub static_layout: bool,
    /// Extra classes appended to the overlay's class list.
    pub class_name: String,
    /// Optional header text, passed through to the view.
    pub header: Option<String>,
    /// Events that trigger a reflow.
    pub triggers: ReflowTriggers,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            prefer_placement: Placement::Bottom,
            auto_position: false,
            mode: PositioningMode::Document,
            static_layout: false,
            class_name: String::new(),
            header: None,
            triggers: ReflowTriggers::default(),
        }
    }
}

/// Where the rendering layer mounts the overlay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mount<N> {
    /// In normal flow, where the overlay is declared.
    Inline,
    /// Into the node returned by the portal function.
    Portal(N),
}

/// Everything the rendering layer needs to paint a visible overlay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlayView<N> {
    /// Position style; `None` in static layout or before the first successful reflow.
    pub style: Option<PositionStyle>,
    /// Space separated class list.
    pub class_name: String,
    /// Placement in effect.
    pub placement: Placement,
    /// Header text.
    pub header: Option<String>,
    /// Mount target.
    pub mount: Mount<N>,
}

type CloseCallback = Box<dyn FnMut()>;
type LayoutCallback = Box<dyn FnMut(&PlacementResult)>;
type Portal<N> = Box<dyn Fn() -> N>;

struct Shared<H: Host> {
    host: Rc<H>,
    anchor: NodeRef<H::Node>,
    floating: NodeRef<H::Node>,
    options: RefCell<OverlayOptions>,
    candidates: RefCell<CandidateOrder>,
    layout: Cell<Option<PlacementResult>>,
    visible: Cell<bool>,
    reflowing: Cell<bool>,
    on_layout: RefCell<Option<LayoutCallback>>,
    on_close: RefCell<Option<CloseCallback>>,
}

impl<H: Host> Shared<H> {
    fn reflow(&self) {
        if self.reflowing.replace(true) {
            log::trace!("nested reflow ignored");
            return;
        }
        self.reflow_once();
        self.reflowing.set(false);
    }

    fn reflow_once(&self) {
        let (Some(anchor), Some(floating)) = (self.anchor.get(), self.floating.get()) else {
            log::debug!("overlay elements not mounted; reflow skipped");
            return;
        };
        let request = {
            let options = self.options.borrow();
            PlacementRequest {
                anchor: anchor.bounding_rect(),
                floating: floating.bounding_rect(),
                candidates: self.candidates.borrow().clone(),
                mode: options.mode,
                auto_fit: options.auto_position,
            }
        };
        let result = resolve(&request, &*self.host);
        if self.layout.get() == Some(result) {
            return;
        }
        self.layout.set(Some(result));
        if let Some(cb) = self.on_layout.borrow_mut().as_mut() {
            cb(&result);
        }
    }

    fn close(&self) {
        if !self.visible.get() {
            return;
        }
        if let Some(cb) = self.on_close.borrow_mut().as_mut() {
            cb();
        }
    }
}

/// A positioned overlay bound to an anchor.
///
/// Dropping the overlay releases all of its listeners.
pub struct Overlay<H: Host + 'static> {
    shared: Rc<Shared<H>>,
    scroll_container: Option<H::Node>,
    portal: Option<Portal<H::Node>>,
    reflow: Option<ReflowHandle<H>>,
    dismiss: Option<ClickOutside<H>>,
}

impl<H: Host + 'static> core::fmt::Debug for Overlay<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Overlay")
            .field("visible", &self.shared.visible.get())
            .field("layout", &self.shared.layout.get())
            .field("options", &*self.shared.options.borrow())
            .field("reflow", &self.reflow)
            .field("dismiss", &self.dismiss)
            .finish_non_exhaustive()
    }
}

impl<H: Host + 'static> Overlay<H> {
    /// Create a hidden overlay.
    ///
    /// `floating` is both the element being positioned and the root for outside-click tests.
    pub fn new(
        host: Rc<H>,
        anchor: NodeRef<H::Node>,
        floating: NodeRef<H::Node>,
        options: OverlayOptions,
    ) -> Self {
        let candidates = candidate_order(options.prefer_placement, options.auto_position);
        Self {
            shared: Rc::new(Shared {
                host,
                anchor,
                floating,
                options: RefCell::new(options),
                candidates: RefCell::new(candidates),
                layout: Cell::new(None),
                visible: Cell::new(false),
                reflowing: Cell::new(false),
                on_layout: RefCell::new(None),
                on_close: RefCell::new(None),
            }),
            scroll_container: None,
            portal: None,
            reflow: None,
            dismiss: None,
        }
    }

    /// Callback for outside clicks while visible.
    pub fn set_on_close(&mut self, f: impl FnMut() + 'static) {
        *self.shared.on_close.borrow_mut() = Some(Box::new(f));
    }

    /// Callback fired whenever the computed layout changes.
    pub fn set_on_layout_change(&mut self, f: impl FnMut(&PlacementResult) + 'static) {
        *self.shared.on_layout.borrow_mut() = Some(Box::new(f));
    }

    /// Function returning the portal mount target. Only called outside static layout.
    pub fn set_portal(&mut self, f: impl Fn() -> H::Node + 'static) {
        self.portal = Some(Box::new(f));
    }

    /// Current options.
    pub fn options(&self) -> Ref<'_, OverlayOptions> {
        self.shared.options.borrow()
    }

    /// Replace the options. A visible overlay re-attaches and recomputes its layout; the
    /// layout callback fires only if the result differs.
    pub fn set_options(&mut self, options: OverlayOptions) {
        if *self.shared.options.borrow() == options {
            return;
        }
        *self.shared.candidates.borrow_mut() =
            candidate_order(options.prefer_placement, options.auto_position);
        let keep_layout = !options.static_layout;
        *self.shared.options.borrow_mut() = options;
        if self.is_visible() {
            // The recomputed layout is compared against the last one, so an unchanged
            // placement does not fire the layout callback.
            let previous = self.shared.layout.get();
            self.release();
            if keep_layout {
                self.shared.layout.set(previous);
            }
            self.acquire();
        }
    }

    /// Returns true while the visible flag is set.
    pub fn is_visible(&self) -> bool {
        self.shared.visible.get()
    }

    /// Apply the externally owned visible flag.
    pub fn set_visible(&mut self, visible: bool) {
        if self.shared.visible.replace(visible) == visible {
            return;
        }
        if visible {
            self.acquire();
        } else {
            self.release();
        }
    }

    /// Follow a different scroll container. Re-attaches the reflow listeners when the
    /// container identity changes while they are attached.
    pub fn set_scroll_container(&mut self, container: Option<H::Node>) {
        if self.scroll_container == container {
            return;
        }
        self.scroll_container = container;
        if self.reflow.take().is_some() {
            self.attach_reflow();
        }
    }

    /// Run a reflow now, as a viewport event would. Ignored while no reflow is attached.
    pub fn reflow(&self) {
        if self.reflow.is_some() {
            self.shared.reflow();
        }
    }

    /// The current layout, if one has been computed.
    pub fn layout(&self) -> Option<PlacementResult> {
        self.shared.layout.get()
    }

    /// Placement in effect: the chosen one, or the preferred one before any layout.
    pub fn placement(&self) -> Placement {
        self.shared
            .layout
            .get()
            .map_or(self.shared.options.borrow().prefer_placement, |l| l.chosen)
    }

    /// Returns true while reflow listeners are attached.
    pub fn is_tracking(&self) -> bool {
        self.reflow.is_some()
    }

    /// Render description, or `None` while hidden.
    pub fn view(&self) -> Option<OverlayView<H::Node>> {
        if !self.is_visible() {
            return None;
        }
        let options = self.shared.options.borrow();
        let placement = self.placement();
        let class_name = parse_class_names(&ClassName::list([
            ClassName::map([
                (format!("{CLASS_BASE}--visible"), true),
                (format!("{CLASS_BASE}--static"), options.static_layout),
            ]),
            ClassName::from(format!("{CLASS_BASE}--{placement}")),
            ClassName::from(options.class_name.as_str()),
            ClassName::from(CLASS_BASE),
        ]));
        let (style, mount) = if options.static_layout {
            (None, Mount::Inline)
        } else {
            let mount = self.portal.as_ref().map_or(Mount::Inline, |p| Mount::Portal(p()));
            (self.layout().map(|l| l.style()), mount)
        };
        Some(OverlayView {
            style,
            class_name,
            placement,
            header: options.header.clone(),
            mount,
        })
    }

    fn acquire(&mut self) {
        let weak = Rc::downgrade(&self.shared);
        self.dismiss = Some(ClickOutside::attach(
            &self.shared.host,
            self.shared.floating.clone(),
            Rc::new(move || {
                if let Some(shared) = Weak::upgrade(&weak) {
                    shared.close();
                }
            }),
        ));
        if !self.shared.options.borrow().static_layout {
            self.attach_reflow();
        }
    }

    fn attach_reflow(&mut self) {
        let weak = Rc::downgrade(&self.shared);
        let triggers = self.shared.options.borrow().triggers;
        self.reflow = Some(reflow::attach(
            &self.shared.host,
            triggers,
            self.scroll_container.as_ref(),
            Rc::new(move || {
                if let Some(shared) = Weak::upgrade(&weak) {
                    shared.reflow();
                }
            }),
        ));
    }

    fn release(&mut self) {
        self.reflow = None;
        self.dismiss = None;
        self.shared.layout.set(None);
    }
}
