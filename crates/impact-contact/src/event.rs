//! Event classification types.

use std::fmt;

/// Which family of callbacks a pair produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventCategory {
    /// At least one side is a trigger: overlap only, no contact geometry.
    Trigger,
    /// Both sides are physical: callbacks carry contact points.
    Collision,
}

/// Where a pair is in its touch streak this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Touched this frame but not the frame before.
    Enter,
    /// Touched this frame and the frame before.
    Stay,
    /// Touched the frame before but not this frame.
    Exit,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enter => write!(f, "enter"),
            Self::Stay => write!(f, "stay"),
            Self::Exit => write!(f, "exit"),
        }
    }
}

/// Set of event categories a listener subscribes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interest(u8);

impl Interest {
    /// No callbacks.
    pub const NONE: Self = Self(0);
    /// Trigger callbacks only.
    pub const TRIGGER: Self = Self(1 << 0);
    /// Collision callbacks only.
    pub const COLLISION: Self = Self(1 << 1);
    /// Both categories.
    pub const ALL: Self = Self(Self::TRIGGER.0 | Self::COLLISION.0);

    /// Whether this set includes `category`.
    pub fn includes(self, category: EventCategory) -> bool {
        let bit = match category {
            EventCategory::Trigger => Self::TRIGGER.0,
            EventCategory::Collision => Self::COLLISION.0,
        };
        self.0 & bit != 0
    }
}

impl Default for Interest {
    fn default() -> Self {
        Self::ALL
    }
}

impl std::ops::BitOr for Interest {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}
