//! Per-pair collision records.

use impact_core::{ColliderId, FrameId};
use smallvec::SmallVec;

use crate::contact::ContactHandle;

/// Index of a [`CollisionInfo`] inside the
/// [`CollisionRegistry`](crate::CollisionRegistry).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RecordId(pub(crate) u32);

impl RecordId {
    /// Position in the registry's record storage.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The tracked state of one collider pair.
///
/// `collider_a < collider_b` always holds for a live record.
#[derive(Clone, Debug, PartialEq)]
pub struct CollisionInfo {
    collider_a: ColliderId,
    collider_b: ColliderId,
    is_trigger: bool,
    contacts: SmallVec<[ContactHandle; 4]>,
    /// Frame of the touch before the most recent one.
    previous_frame: Option<FrameId>,
    /// Frame of the most recent touch.
    current_frame: Option<FrameId>,
    in_use: bool,
}

impl CollisionInfo {
    pub(crate) fn vacant() -> Self {
        Self {
            collider_a: ColliderId::NONE,
            collider_b: ColliderId::NONE,
            is_trigger: false,
            contacts: SmallVec::new(),
            previous_frame: None,
            current_frame: None,
            in_use: false,
        }
    }

    /// Lower collider id of the pair.
    pub fn collider_a(&self) -> ColliderId {
        self.collider_a
    }

    /// Higher collider id of the pair.
    pub fn collider_b(&self) -> ColliderId {
        self.collider_b
    }

    /// The pair's partner for `this`.
    pub fn other(&self, this: ColliderId) -> ColliderId {
        if this == self.collider_a {
            self.collider_b
        } else {
            self.collider_a
        }
    }

    /// Whether the current streak is a trigger overlap.
    pub fn is_trigger(&self) -> bool {
        self.is_trigger
    }

    /// Contacts recorded for the pair this frame.
    pub fn contact_handles(&self) -> &[ContactHandle] {
        &self.contacts
    }

    /// Frame of the most recent touch.
    pub fn current_frame(&self) -> Option<FrameId> {
        self.current_frame
    }

    /// Frame of the touch before the most recent one.
    pub fn previous_frame(&self) -> Option<FrameId> {
        self.previous_frame
    }

    /// Whether the record is assigned to a pair (not sitting in the pool).
    pub fn is_in_use(&self) -> bool {
        self.in_use
    }

    pub(crate) fn assign(&mut self, collider_a: ColliderId, collider_b: ColliderId) {
        *self = Self {
            collider_a,
            collider_b,
            in_use: true,
            ..Self::vacant()
        };
    }

    pub(crate) fn reset(&mut self) {
        let contacts = std::mem::take(&mut self.contacts);
        *self = Self::vacant();
        // Keep any spilled allocation for the next pair.
        self.contacts = contacts;
        self.contacts.clear();
    }

    /// Stamp a touch in `frame`.
    ///
    /// Returns `true` on the first touch of the frame, which shifts the
    /// frame stamps, clears last frame's contacts, and latches the trigger
    /// flag if this touch starts a new streak.
    pub(crate) fn touch(&mut self, frame: FrameId, is_trigger: bool) -> bool {
        if self.current_frame == Some(frame) {
            return false;
        }
        let continuing = self.current_frame.is_some_and(|last| frame.follows(last));
        self.previous_frame = self.current_frame;
        self.current_frame = Some(frame);
        self.contacts.clear();
        if !continuing {
            self.is_trigger = is_trigger;
        }
        true
    }

    /// Whether the pair was also touched in the frame before `frame`.
    pub(crate) fn continues_into(&self, frame: FrameId) -> bool {
        self.current_frame == Some(frame)
            && self.previous_frame.is_some_and(|prev| frame.follows(prev))
    }

    pub(crate) fn push_contact(&mut self, handle: ContactHandle) {
        self.contacts.push(handle);
    }

    pub(crate) fn clear_contacts(&mut self) {
        self.contacts.clear();
    }
}
