// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport geometry: is a box fully inside the visible area?

use kurbo::{Rect, Size, Vec2};

use crate::host::Viewport;

/// Returns true if `rect` lies entirely within a viewport of the given size.
///
/// Edges touching the viewport boundary count as inside.
pub fn is_fully_visible(rect: Rect, viewport: Size) -> bool {
    rect.y0 >= 0.0 && rect.x0 >= 0.0 && rect.y1 <= viewport.height && rect.x1 <= viewport.width
}

/// Same as [`is_fully_visible`], reading the live size from `viewport` on every call.
pub fn is_in_viewport(rect: Rect, viewport: &(impl Viewport + ?Sized)) -> bool {
    is_fully_visible(rect, viewport.viewport_size())
}

/// A fixed viewport snapshot.
///
/// Useful for pure placement computations, benchmarks, and tests.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ViewportState {
    /// Visible size.
    pub size: Size,
    /// Document scroll offset.
    pub scroll: Vec2,
}

impl ViewportState {
    /// An unscrolled viewport of the given size.
    pub const fn new(size: Size) -> Self {
        Self {
            size,
            scroll: Vec2::ZERO,
        }
    }

    /// The same viewport scrolled to `scroll`.
    pub const fn with_scroll(self, scroll: Vec2) -> Self {
        Self {
            size: self.size,
            scroll,
        }
    }
}

impl Viewport for ViewportState {
    fn viewport_size(&self) -> Size {
        self.size
    }

    fn scroll_offset(&self) -> Vec2 {
        self.scroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Size = Size::new(800.0, 600.0);

    #[test]
    fn inside_and_touching_edges_is_visible() {
        assert!(is_fully_visible(Rect::new(10.0, 10.0, 20.0, 20.0), VIEW));
        assert!(is_fully_visible(Rect::new(0.0, 0.0, 800.0, 600.0), VIEW));
    }

    #[test]
    fn any_edge_outside_is_not_visible() {
        assert!(!is_fully_visible(Rect::new(-1.0, 10.0, 20.0, 20.0), VIEW));
        assert!(!is_fully_visible(Rect::new(10.0, -0.5, 20.0, 20.0), VIEW));
        assert!(!is_fully_visible(Rect::new(10.0, 10.0, 801.0, 20.0), VIEW));
        assert!(!is_fully_visible(Rect::new(10.0, 10.0, 20.0, 600.5), VIEW));
    }

    #[test]
    fn live_viewport_is_read_each_call() {
        let mut vp = ViewportState::new(VIEW);
        let r = Rect::new(700.0, 0.0, 790.0, 50.0);
        assert!(is_in_viewport(r, &vp));
        vp.size = Size::new(500.0, 600.0);
        assert!(!is_in_viewport(r, &vp));
    }
}
