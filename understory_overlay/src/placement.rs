// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement resolution.
//!
//! ## Overview
//!
//! Given an anchor box, the measured floating box, and an ordered list of candidate sides,
//! [`resolve`] computes the translation that attaches the floating box to the anchor.
//!
//! - The floating box is centered on the anchor's cross axis and flush with the anchor's
//!   near edge on the main axis.
//! - Coordinates are floored to whole pixels.
//! - [`PositioningMode::Document`] folds the scroll offset in; [`PositioningMode::Sticky`]
//!   keeps viewport coordinates.
//!
//! ## Auto-fit
//!
//! With `auto_fit` set, candidates are tried in order and the first one that keeps the
//! floating element fully inside the viewport wins. Each candidate is tested with the
//! measured box moved to that candidate's origin; for the placement currently painted this is
//! exactly the measured box. When nothing fits, the last candidate is used.

use kurbo::{Point, Rect, Size};

use crate::host::Viewport;
use crate::types::{
    CandidateOrder, Placement, PlacementRequest, PlacementResult, PositioningMode, Translate,
};
use crate::viewport::is_in_viewport;

/// Candidate order for a preferred placement.
///
/// Without auto-fit only `prefer` is tried. With auto-fit, `prefer` comes first and the
/// remaining sides follow in the order of [`Placement::ALL`].
pub fn candidate_order(prefer: Placement, auto_fit: bool) -> CandidateOrder {
    let mut order = CandidateOrder::single(prefer);
    if auto_fit {
        for p in Placement::ALL {
            order.push(p);
        }
    }
    order
}

/// Viewport-relative, floored origin of a floating box of `size` placed on `placement`.
pub fn placement_origin(placement: Placement, anchor: Rect, size: Size) -> Point {
    let center = anchor.center();
    let origin = match placement {
        Placement::Top => Point::new(center.x - size.width / 2.0, anchor.y0 - size.height),
        Placement::Bottom => Point::new(center.x - size.width / 2.0, anchor.y1),
        Placement::Left => Point::new(anchor.x0 - size.width, center.y - size.height / 2.0),
        Placement::Right => Point::new(anchor.x1, center.y - size.height / 2.0),
    };
    origin.floor()
}

/// Resolve a placement request against the current viewport.
///
/// Never fails: without auto-fit the preferred placement is returned, and with auto-fit the
/// last candidate is returned when none fits.
pub fn resolve(request: &PlacementRequest, viewport: &(impl Viewport + ?Sized)) -> PlacementResult {
    let size = request.floating.size();
    let mut chosen = request.candidates.preferred();
    if request.auto_fit {
        chosen = request.candidates.last();
        for placement in request.candidates.iter() {
            let origin = placement_origin(placement, request.anchor, size);
            if is_in_viewport(Rect::from_origin_size(origin, size), viewport) {
                chosen = placement;
                break;
            }
            log::trace!("placement {placement} leaves the viewport");
        }
    }

    let mut origin = placement_origin(chosen, request.anchor, size);
    if request.mode == PositioningMode::Document {
        origin = (origin + viewport.scroll_offset()).floor();
    }
    PlacementResult {
        translate: to_translate(origin),
        mode: request.mode,
        chosen,
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Pixel coordinates are floored first; `as` saturates out-of-range values."
)]
fn to_translate(p: Point) -> Translate {
    Translate::new(p.x as i32, p.y as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::ViewportState;
    use alloc::vec::Vec;
    use kurbo::Vec2;

    fn anchor() -> Rect {
        // top 100, left 50, right 150, bottom 130
        Rect::new(50.0, 100.0, 150.0, 130.0)
    }

    fn floating() -> Rect {
        Rect::new(0.0, 0.0, 40.0, 20.0)
    }

    fn request(p: Placement, mode: PositioningMode) -> PlacementRequest {
        PlacementRequest {
            anchor: anchor(),
            floating: floating(),
            candidates: CandidateOrder::single(p),
            mode,
            auto_fit: false,
        }
    }

    #[test]
    fn each_side_attaches_flush_and_centered() {
        let vp = ViewportState::new(Size::new(800.0, 600.0));
        let at = |p| resolve(&request(p, PositioningMode::Sticky), &vp).translate;
        assert_eq!(at(Placement::Top), Translate::new(80, 80));
        assert_eq!(at(Placement::Bottom), Translate::new(80, 130));
        assert_eq!(at(Placement::Left), Translate::new(10, 105));
        assert_eq!(at(Placement::Right), Translate::new(150, 105));
    }

    #[test]
    fn sticky_and_document_agree_without_scroll() {
        let vp = ViewportState::new(Size::new(800.0, 600.0));
        for mode in [PositioningMode::Sticky, PositioningMode::Document] {
            let r = resolve(&request(Placement::Bottom, mode), &vp);
            assert_eq!(r.translate, Translate::new(80, 130));
            assert_eq!(r.mode, mode);
        }
    }

    #[test]
    fn document_mode_adds_scroll_and_sticky_ignores_it() {
        let vp = ViewportState::new(Size::new(800.0, 600.0)).with_scroll(Vec2::new(10.0, 20.0));
        let doc = resolve(&request(Placement::Bottom, PositioningMode::Document), &vp);
        assert_eq!(doc.translate, Translate::new(90, 150));
        let sticky = resolve(&request(Placement::Bottom, PositioningMode::Sticky), &vp);
        assert_eq!(sticky.translate, Translate::new(80, 130));
    }

    #[test]
    fn coordinates_are_floored() {
        let vp = ViewportState::new(Size::new(800.0, 600.0));
        let mut req = request(Placement::Bottom, PositioningMode::Sticky);
        req.anchor = Rect::new(0.0, 0.0, 15.0, 10.5);
        req.floating = Rect::new(0.0, 0.0, 4.0, 4.0);
        // center x 7.5 - 2 = 5.5 -> 5; bottom 10.5 -> 10
        assert_eq!(resolve(&req, &vp).translate, Translate::new(5, 10));

        req.floating = Rect::new(0.0, 0.0, 20.0, 4.0);
        // 7.5 - 10 = -2.5 -> -3
        assert_eq!(resolve(&req, &vp).translate.x, -3);
    }

    #[test]
    fn resolving_twice_is_idempotent() {
        let vp = ViewportState::new(Size::new(300.0, 200.0)).with_scroll(Vec2::new(3.0, 7.0));
        let mut req = request(Placement::Right, PositioningMode::Document);
        req.candidates = candidate_order(Placement::Right, true);
        req.auto_fit = true;
        assert_eq!(resolve(&req, &vp), resolve(&req, &vp));
    }

    #[test]
    fn floating_origin_is_ignored() {
        let vp = ViewportState::new(Size::new(800.0, 600.0));
        let mut req = request(Placement::Top, PositioningMode::Sticky);
        req.anchor = Rect::new(50.0, 10.0, 150.0, 40.0);
        req.candidates = candidate_order(Placement::Top, true);
        req.auto_fit = true;
        let at_origin = resolve(&req, &vp);
        assert_eq!(at_origin.chosen, Placement::Bottom);

        // Same size, painted far outside the viewport.
        req.floating = Rect::new(-500.0, 900.0, -460.0, 920.0);
        assert_eq!(resolve(&req, &vp), at_origin);
    }

    #[test]
    fn preferred_placement_is_always_first() {
        for auto_fit in [false, true] {
            for p in Placement::ALL {
                let order = candidate_order(p, auto_fit);
                assert_eq!(order.iter().next(), Some(p));
                assert_eq!(order.preferred(), p);
            }
        }
    }

    #[test]
    fn auto_fit_order_covers_all_sides_once() {
        let order: Vec<_> = candidate_order(Placement::Left, true).iter().collect();
        assert_eq!(
            order,
            [
                Placement::Left,
                Placement::Top,
                Placement::Bottom,
                Placement::Right
            ]
        );
        assert_eq!(candidate_order(Placement::Left, false).len(), 1);
    }

    #[test]
    fn auto_fit_skips_candidates_that_leave_the_viewport() {
        // Anchor hugs the top edge: `top` would go negative, `bottom` fits.
        let vp = ViewportState::new(Size::new(800.0, 600.0));
        let req = PlacementRequest {
            anchor: Rect::new(50.0, 0.0, 150.0, 30.0),
            floating: floating(),
            candidates: candidate_order(Placement::Top, true),
            mode: PositioningMode::Document,
            auto_fit: true,
        };
        let r = resolve(&req, &vp);
        assert_eq!(r.chosen, Placement::Bottom);
        assert_eq!(r.translate, Translate::new(80, 30));
    }

    #[test]
    fn auto_fit_accepts_first_fitting_candidate() {
        let vp = ViewportState::new(Size::new(800.0, 600.0));
        let mut req = request(Placement::Top, PositioningMode::Sticky);
        req.candidates = candidate_order(Placement::Top, true);
        req.auto_fit = true;
        assert_eq!(resolve(&req, &vp).chosen, Placement::Top);
    }

    #[test]
    fn fallback_exhaustion_returns_last_candidate() {
        // Floating box larger than the viewport: nothing can fit.
        let vp = ViewportState::new(Size::new(100.0, 100.0));
        let req = PlacementRequest {
            anchor: Rect::new(40.0, 40.0, 60.0, 60.0),
            floating: Rect::new(0.0, 0.0, 500.0, 500.0),
            candidates: CandidateOrder::new([Placement::Right, Placement::Left, Placement::Top])
                .unwrap(),
            mode: PositioningMode::Sticky,
            auto_fit: true,
        };
        let r = resolve(&req, &vp);
        assert_eq!(r.chosen, Placement::Top);
        assert!(req.candidates.contains(r.chosen));
    }

    #[test]
    fn without_auto_fit_first_candidate_is_accepted_even_offscreen() {
        let vp = ViewportState::new(Size::new(100.0, 100.0));
        let req = PlacementRequest {
            anchor: Rect::new(40.0, 0.0, 60.0, 10.0),
            floating: floating(),
            candidates: candidate_order(Placement::Top, true),
            mode: PositioningMode::Sticky,
            auto_fit: false,
        };
        let r = resolve(&req, &vp);
        assert_eq!(r.chosen, Placement::Top);
        assert_eq!(r.translate.y, -20);
    }

    #[test]
    fn zero_and_negative_sizes_collapse_without_panicking() {
        let vp = ViewportState::new(Size::new(800.0, 600.0));
        let point = Rect::new(10.0, 20.0, 10.0, 20.0);
        for p in Placement::ALL {
            let req = PlacementRequest {
                anchor: point,
                floating: Rect::ZERO,
                candidates: candidate_order(p, true),
                mode: PositioningMode::Document,
                auto_fit: true,
            };
            let r = resolve(&req, &vp);
            assert_eq!(r.translate, Translate::new(10, 20));
        }

        let req = PlacementRequest {
            anchor: Rect::new(10.0, 10.0, 0.0, 0.0),
            floating: Rect::new(0.0, 0.0, -4.0, -4.0),
            candidates: candidate_order(Placement::Bottom, true),
            mode: PositioningMode::Sticky,
            auto_fit: true,
        };
        let r = resolve(&req, &vp);
        assert!(req.candidates.contains(r.chosen));
    }
}
