// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition phases.

/// One of the four lifecycle phases of a mount/unmount transition.
///
/// `Entering` settles into `Entered` and `Exiting` settles into `Exited`. The settled phases are
/// rest states.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Heading towards [`Phase::Entered`].
    Entering,
    /// Fully shown.
    Entered,
    /// Heading towards [`Phase::Exited`].
    Exiting,
    /// Fully hidden.
    #[default]
    Exited,
}

impl Phase {
    /// Lowercase name, also used as the phase's CSS class.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Entering => "entering",
            Self::Entered => "entered",
            Self::Exiting => "exiting",
            Self::Exited => "exited",
        }
    }

    /// Returns true for `Entered` and `Exited`.
    pub const fn is_rest(self) -> bool {
        matches!(self, Self::Entered | Self::Exited)
    }

    /// Returns true for `Entering` and `Entered`.
    pub const fn is_enter(self) -> bool {
        matches!(self, Self::Entering | Self::Entered)
    }

    /// Returns true for `Exiting` and `Exited`.
    pub const fn is_exit(self) -> bool {
        !self.is_enter()
    }

    /// The rest state this phase settles into.
    pub const fn settled(self) -> Self {
        match self {
            Self::Entering | Self::Entered => Self::Entered,
            Self::Exiting | Self::Exited => Self::Exited,
        }
    }
}

impl core::fmt::Display for Phase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
