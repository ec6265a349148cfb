//! Slot views handed out by the transform arena.
//!
//! A [`SlotView`] names one slot by its enclosing unit and its index in
//! that unit. It is a back-reference only: the arena owns the memory.
//! Views are deliberately neither `Clone` nor `Copy`, so
//! [`TransformArena::release`](crate::TransformArena::release) consumes
//! the only handle and a released view cannot be read again.

use std::fmt;

use impact_core::UnitId;

use crate::node::NODE_STRIDE_WORDS;

/// Location of one live transform slot.
#[derive(Debug, PartialEq, Eq, Hash)]
#[must_use = "a slot view must be released back to its arena"]
pub struct SlotView {
    pub(crate) arena: u32,
    pub(crate) unit: UnitId,
    pub(crate) index: u32,
}

impl SlotView {
    pub(crate) fn new(arena: u32, unit: UnitId, index: u32) -> Self {
        Self { arena, unit, index }
    }

    /// The unit this slot lives in.
    pub fn unit(&self) -> UnitId {
        self.unit
    }

    /// Slot index within the unit.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Word offset of the slot's first word within the unit's storage.
    pub fn offset(&self) -> usize {
        self.index as usize * NODE_STRIDE_WORDS
    }
}

impl fmt::Display for SlotView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SlotView(unit={}, off={})", self.unit, self.offset())
    }
}
