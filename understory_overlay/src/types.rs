// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement vocabulary: sides, positioning modes, candidate orders, requests, and results.
//!
//! These types are consumed by [`resolve`](crate::placement::resolve) and stored by
//! [`Overlay`](crate::overlay::Overlay) as its current layout.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::style::{CssPosition, PositionStyle};

/// Side of the anchor the floating element attaches to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Above the anchor, horizontally centered.
    Top,
    /// Below the anchor, horizontally centered.
    #[default]
    Bottom,
    /// Left of the anchor, vertically centered.
    Left,
    /// Right of the anchor, vertically centered.
    Right,
}

impl Placement {
    /// All placements in the fixed fallback order used by [`candidate_order`](crate::placement::candidate_order).
    pub const ALL: [Self; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    /// Lowercase name, as used in class names.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl core::fmt::Display for Placement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coordinate space of a computed position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PositioningMode {
    /// Viewport coordinates (`position: fixed`). Must be recomputed on every scroll.
    Sticky,
    /// Document coordinates (`position: absolute`). The scroll offset is folded in, so the
    /// value stays valid across scrolling until the layout changes.
    #[default]
    Document,
}

/// Integer translation applied to the floating element.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Translate {
    /// Horizontal offset in pixels.
    pub x: i32,
    /// Vertical offset in pixels.
    pub y: i32,
}

impl Translate {
    /// Create a translation.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Contract violations when building a placement request.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    /// A candidate order needs at least one placement.
    #[error("candidate order must contain at least one placement")]
    NoCandidates,
}

/// Non-empty, duplicate-free list of placements to try, preferred placement first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateOrder {
    first: Placement,
    rest: Vec<Placement>,
}

impl CandidateOrder {
    /// Build an order from a sequence of placements.
    ///
    /// Later duplicates are dropped. Returns [`PlacementError::NoCandidates`] when empty.
    pub fn new(placements: impl IntoIterator<Item = Placement>) -> Result<Self, PlacementError> {
        let mut it = placements.into_iter();
        let first = it.next().ok_or(PlacementError::NoCandidates)?;
        let mut order = Self::single(first);
        for p in it {
            order.push(p);
        }
        Ok(order)
    }

    /// An order with a single placement.
    pub const fn single(placement: Placement) -> Self {
        Self {
            first: placement,
            rest: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, placement: Placement) {
        if !self.contains(placement) {
            self.rest.push(placement);
        }
    }

    /// The preferred (first) placement.
    pub const fn preferred(&self) -> Placement {
        self.first
    }

    /// The last placement; the fallback when nothing fits.
    pub fn last(&self) -> Placement {
        self.rest.last().copied().unwrap_or(self.first)
    }

    /// Number of candidates; never zero.
    pub fn len(&self) -> usize {
        1 + self.rest.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Returns true if `placement` is one of the candidates.
    pub fn contains(&self, placement: Placement) -> bool {
        self.first == placement || self.rest.contains(&placement)
    }

    /// Iterate candidates in order.
    pub fn iter(&self) -> impl Iterator<Item = Placement> + '_ {
        core::iter::once(self.first).chain(self.rest.iter().copied())
    }
}

impl TryFrom<Vec<Placement>> for CandidateOrder {
    type Error = PlacementError;

    fn try_from(value: Vec<Placement>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Input to [`resolve`](crate::placement::resolve).
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementRequest {
    /// Anchor bounding box, viewport coordinates.
    pub anchor: Rect,
    /// Measured bounding box of the floating element, viewport coordinates.
    ///
    /// Only its size is used. Auto-fit tests a box of this size at each candidate's origin.
    pub floating: Rect,
    /// Placements to try.
    pub candidates: CandidateOrder,
    /// Coordinate space of the result.
    pub mode: PositioningMode,
    /// Try candidates until one keeps the floating element inside the viewport.
    pub auto_fit: bool,
}

/// Output of [`resolve`](crate::placement::resolve).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PlacementResult {
    /// Floored translation in the coordinate space of `mode`.
    pub translate: Translate,
    /// Coordinate space of `translate`.
    pub mode: PositioningMode,
    /// Placement that was accepted; always one of the request's candidates.
    pub chosen: Placement,
}

impl PlacementResult {
    /// Structured style for the rendering layer.
    pub const fn style(&self) -> PositionStyle {
        PositionStyle {
            position: CssPosition::for_mode(self.mode),
            translate: self.translate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn empty_order_is_rejected() {
        assert_eq!(
            CandidateOrder::new([]).unwrap_err(),
            PlacementError::NoCandidates
        );
        assert_eq!(
            CandidateOrder::try_from(Vec::new()),
            Err(PlacementError::NoCandidates)
        );
    }

    #[test]
    fn duplicates_are_dropped_keeping_first_occurrence() {
        let order = CandidateOrder::new([
            Placement::Left,
            Placement::Top,
            Placement::Left,
            Placement::Top,
            Placement::Right,
        ])
        .unwrap();
        let seen: Vec<_> = order.iter().collect();
        assert_eq!(seen, vec![Placement::Left, Placement::Top, Placement::Right]);
        assert_eq!(order.len(), 3);
        assert_eq!(order.preferred(), Placement::Left);
        assert_eq!(order.last(), Placement::Right);
    }

    #[test]
    fn single_order_first_is_last() {
        let order = CandidateOrder::single(Placement::Top);
        assert_eq!(order.last(), Placement::Top);
        assert_eq!(order.len(), 1);
        assert!(!order.is_empty());
    }
}
