// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structured position style handed to the rendering layer.

use crate::types::{PositioningMode, Translate};

/// CSS `position` value matching a [`PositioningMode`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CssPosition {
    /// `position: fixed`.
    Fixed,
    /// `position: absolute`.
    Absolute,
}

impl CssPosition {
    /// Position keyword for a positioning mode.
    pub const fn for_mode(mode: PositioningMode) -> Self {
        match mode {
            PositioningMode::Sticky => Self::Fixed,
            PositioningMode::Document => Self::Absolute,
        }
    }

    /// CSS keyword.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Absolute => "absolute",
        }
    }
}

/// Position style of a floating element.
///
/// Its [`Display`](core::fmt::Display) form is an inline style string:
///
/// ```
/// use understory_overlay::style::{CssPosition, PositionStyle};
/// use understory_overlay::types::Translate;
///
/// let style = PositionStyle { position: CssPosition::Fixed, translate: Translate::new(4, -2) };
/// assert_eq!(
///     style.to_string(),
///     "position: fixed; transform: translate3d(4px, -2px, 0px);"
/// );
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PositionStyle {
    /// CSS `position`.
    pub position: CssPosition,
    /// Translation applied through `transform`.
    pub translate: Translate,
}

impl core::fmt::Display for PositionStyle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "position: {}; transform: translate3d({}px, {}px, 0px);",
            self.position.as_str(),
            self.translate.x,
            self.translate.y
        )
    }
}
