//! Strongly-typed identifiers.

use std::fmt;

/// Identifies a collider registered with a contact world.
///
/// Ids are handed out by the collider table in increasing order and are
/// never reused, so the numeric order doubles as the canonical pair order
/// used by the collision registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColliderId(pub u32);

impl ColliderId {
    /// Placeholder id carried by cleared contact records.
    pub const NONE: Self = Self(u32::MAX);

    /// Whether this is the [`ColliderId::NONE`] placeholder.
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

impl fmt::Display for ColliderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ColliderId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Monotonically increasing simulation step counter.
///
/// Frame 0 means "never stepped"; the first step is frame 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub u64);

impl FrameId {
    /// The frame after this one, or `None` on overflow.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    /// Whether `self` immediately follows `earlier`.
    pub fn follows(self, earlier: Self) -> bool {
        earlier.0.checked_add(1) == Some(self.0)
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for FrameId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Index of a storage unit inside the transform arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for UnitId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_follows_only_its_predecessor() {
        assert!(FrameId(5).follows(FrameId(4)));
        assert!(!FrameId(5).follows(FrameId(3)));
        assert!(!FrameId(5).follows(FrameId(5)));
        assert!(!FrameId(0).follows(FrameId(u64::MAX)));
    }

    #[test]
    fn frame_next_saturates_to_none() {
        assert_eq!(FrameId(1).next(), Some(FrameId(2)));
        assert_eq!(FrameId(u64::MAX).next(), None);
    }

    #[test]
    fn collider_none_placeholder() {
        assert!(ColliderId::NONE.is_none());
        assert!(!ColliderId(0).is_none());
        assert!(ColliderId(1) < ColliderId(2));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn follows_agrees_with_next(a in any::<u64>(), b in any::<u64>()) {
                prop_assert_eq!(FrameId(a).follows(FrameId(b)), FrameId(b).next() == Some(FrameId(a)));
            }

            #[test]
            fn next_is_followed_by_itself(a in 0u64..u64::MAX) {
                let next = FrameId(a).next();
                prop_assert!(next.is_some_and(|n| n.follows(FrameId(a))));
            }
        }
    }
}
