//! Per-node slot layout and dirty flags.
//!
//! Each slot is a `#[repr(C)]` record of 45 four-byte words:
//!
//! ```text
//! word  0      prev_or_free_next   (u32)  link, meaning depends on owning list
//! word  1      using_next          (u32)  link, valid only while in use
//! word  2      flags               (u32)  dirty bits + live marker
//! words 3..13  TRS                 (f32)  position xyz, rotation xyzw, scale xyz
//! words 13..29 local matrix        (f32)  4×4 column-major
//! words 29..45 world matrix        (f32)  4×4 column-major
//! ```
//!
//! Word 0 is overloaded: while the slot is on the free list it holds the
//! index of the next free slot; while the slot is on the using list it holds
//! the index of the previous live slot. Which list currently owns the slot
//! (recorded by the live marker in word 2) decides how it is read.

use bytemuck::{Pod, Zeroable};

/// End-of-list marker for slot links.
pub(crate) const INVALID_INDEX: u32 = u32::MAX;

/// Slot stride in `u32` words.
pub const NODE_STRIDE_WORDS: usize = std::mem::size_of::<TransformNode>() / 4;

/// Word offset of the TRS block within a slot.
pub const TRS_WORD_OFFSET: usize = 3;
/// Word offset of the local matrix within a slot.
pub const LOCAL_MATRIX_WORD_OFFSET: usize = 13;
/// Word offset of the world matrix within a slot.
pub const WORLD_MATRIX_WORD_OFFSET: usize = 29;

const _: () = assert!(NODE_STRIDE_WORDS == 45);
const _: () = assert!(std::mem::size_of::<TransformNode>() % 4 == 0);

const LIVE_BIT: u32 = 1 << 31;

const IDENTITY_MATRIX: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

const IDENTITY_TRS: [f32; 10] = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0];

/// Which TRS components changed since the flags were last taken.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DirtyFlags(u32);

impl DirtyFlags {
    /// Nothing changed.
    pub const NONE: Self = Self(0);
    /// Position changed.
    pub const POSITION: Self = Self(1 << 0);
    /// Rotation changed.
    pub const ROTATION: Self = Self(1 << 1);
    /// Scale changed.
    pub const SCALE: Self = Self(1 << 2);
    /// All TRS components changed.
    pub const ALL: Self = Self(Self::POSITION.0 | Self::ROTATION.0 | Self::SCALE.0);

    /// Raw bit pattern.
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Whether every bit in `other` is set.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether no bits are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Union of both flag sets.
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl std::ops::BitOr for DirtyFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// One transform slot.
///
/// The link words are private to the arena; callers only see the payload
/// through the accessors below.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct TransformNode {
    prev_or_free_next: u32,
    using_next: u32,
    flags: u32,
    trs: [f32; 10],
    local: [f32; 16],
    world: [f32; 16],
}

impl TransformNode {
    /// A free slot linked to `next_free`.
    pub(crate) fn free(next_free: u32) -> Self {
        Self {
            prev_or_free_next: next_free,
            using_next: INVALID_INDEX,
            flags: 0,
            trs: IDENTITY_TRS,
            local: IDENTITY_MATRIX,
            world: IDENTITY_MATRIX,
        }
    }

    // ── link words (arena-internal) ─────────────────────────────

    pub(crate) fn next_free(&self) -> u32 {
        debug_assert!(!self.is_live());
        self.prev_or_free_next
    }

    pub(crate) fn prev_using(&self) -> u32 {
        debug_assert!(self.is_live());
        self.prev_or_free_next
    }

    pub(crate) fn next_using(&self) -> u32 {
        self.using_next
    }

    pub(crate) fn set_next_using(&mut self, next: u32) {
        self.using_next = next;
    }

    pub(crate) fn set_prev_using(&mut self, prev: u32) {
        self.prev_or_free_next = prev;
    }

    /// Move onto the using list after `prev`, with a fresh identity payload.
    pub(crate) fn make_live(&mut self, prev: u32) {
        self.prev_or_free_next = prev;
        self.using_next = INVALID_INDEX;
        self.flags = LIVE_BIT | DirtyFlags::ALL.0;
        self.trs = IDENTITY_TRS;
        self.local = IDENTITY_MATRIX;
        self.world = IDENTITY_MATRIX;
    }

    /// Move onto the free list in front of `next_free`.
    pub(crate) fn make_free(&mut self, next_free: u32) {
        self.prev_or_free_next = next_free;
        self.using_next = INVALID_INDEX;
        self.flags = 0;
    }

    /// Whether the slot is currently on the using list.
    pub fn is_live(&self) -> bool {
        self.flags & LIVE_BIT != 0
    }

    // ── dirty flags ─────────────────────────────────────────────

    /// Components changed since the last [`take_dirty`](Self::take_dirty).
    pub fn dirty(&self) -> DirtyFlags {
        DirtyFlags(self.flags & DirtyFlags::ALL.0)
    }

    /// Mark components as changed.
    pub fn mark_dirty(&mut self, flags: DirtyFlags) {
        self.flags |= flags.0 & DirtyFlags::ALL.0;
    }

    /// Return the dirty flags and clear them.
    pub fn take_dirty(&mut self) -> DirtyFlags {
        let dirty = self.dirty();
        self.flags &= !DirtyFlags::ALL.0;
        dirty
    }

    // ── TRS ─────────────────────────────────────────────────────

    /// Position, xyz.
    pub fn position(&self) -> [f32; 3] {
        [self.trs[0], self.trs[1], self.trs[2]]
    }

    /// Set the position and mark it dirty.
    pub fn set_position(&mut self, p: [f32; 3]) {
        self.trs[0..3].copy_from_slice(&p);
        self.mark_dirty(DirtyFlags::POSITION);
    }

    /// Rotation quaternion, xyzw.
    pub fn rotation(&self) -> [f32; 4] {
        [self.trs[3], self.trs[4], self.trs[5], self.trs[6]]
    }

    /// Set the rotation and mark it dirty.
    pub fn set_rotation(&mut self, q: [f32; 4]) {
        self.trs[3..7].copy_from_slice(&q);
        self.mark_dirty(DirtyFlags::ROTATION);
    }

    /// Scale, xyz.
    pub fn scale(&self) -> [f32; 3] {
        [self.trs[7], self.trs[8], self.trs[9]]
    }

    /// Set the scale and mark it dirty.
    pub fn set_scale(&mut self, s: [f32; 3]) {
        self.trs[7..10].copy_from_slice(&s);
        self.mark_dirty(DirtyFlags::SCALE);
    }

    /// Raw TRS block. Writes through this do not touch the dirty flags.
    pub fn trs(&self) -> &[f32; 10] {
        &self.trs
    }

    /// Mutable raw TRS block.
    pub fn trs_mut(&mut self) -> &mut [f32; 10] {
        &mut self.trs
    }

    // ── matrices ────────────────────────────────────────────────

    /// Local matrix, column-major.
    pub fn local_matrix(&self) -> &[f32; 16] {
        &self.local
    }

    /// Mutable local matrix.
    pub fn local_matrix_mut(&mut self) -> &mut [f32; 16] {
        &mut self.local
    }

    /// World matrix, column-major.
    pub fn world_matrix(&self) -> &[f32; 16] {
        &self.world
    }

    /// Mutable world matrix.
    pub fn world_matrix_mut(&mut self) -> &mut [f32; 16] {
        &mut self.world
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_offsets_match_word_map() {
        let mut node = TransformNode::free(INVALID_INDEX);
        node.make_live(INVALID_INDEX);
        node.trs_mut()[0] = 7.0;
        node.local_matrix_mut()[0] = 8.0;
        node.world_matrix_mut()[0] = 9.0;
        let words: &[u32] = bytemuck::cast_slice(std::slice::from_ref(&node));
        assert_eq!(words.len(), NODE_STRIDE_WORDS);
        assert_eq!(f32::from_bits(words[TRS_WORD_OFFSET]), 7.0);
        assert_eq!(f32::from_bits(words[LOCAL_MATRIX_WORD_OFFSET]), 8.0);
        assert_eq!(f32::from_bits(words[WORLD_MATRIX_WORD_OFFSET]), 9.0);
    }

    #[test]
    fn live_slot_starts_identity_and_fully_dirty() {
        let mut node = TransformNode::free(3);
        node.make_live(INVALID_INDEX);
        assert!(node.is_live());
        assert_eq!(node.dirty(), DirtyFlags::ALL);
        assert_eq!(node.rotation(), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(node.scale(), [1.0, 1.0, 1.0]);
        assert_eq!(node.world_matrix()[15], 1.0);
    }

    #[test]
    fn setters_mark_matching_dirty_bits() {
        let mut node = TransformNode::free(INVALID_INDEX);
        node.make_live(INVALID_INDEX);
        assert_eq!(node.take_dirty(), DirtyFlags::ALL);
        assert!(node.dirty().is_empty());

        node.set_position([1.0, 2.0, 3.0]);
        assert_eq!(node.dirty(), DirtyFlags::POSITION);
        node.set_scale([2.0, 2.0, 2.0]);
        assert!(node.dirty().contains(DirtyFlags::POSITION | DirtyFlags::SCALE));
        assert!(!node.dirty().contains(DirtyFlags::ROTATION));
        assert_eq!(node.position(), [1.0, 2.0, 3.0]);
        // Taking dirty bits never clears the live marker.
        node.take_dirty();
        assert!(node.is_live());
    }

    #[test]
    fn mark_dirty_ignores_foreign_bits() {
        let mut node = TransformNode::free(INVALID_INDEX);
        node.mark_dirty(DirtyFlags(u32::MAX));
        assert!(!node.is_live());
        assert_eq!(node.dirty(), DirtyFlags::ALL);
    }

    #[test]
    fn make_free_clears_flags() {
        let mut node = TransformNode::free(INVALID_INDEX);
        node.make_live(INVALID_INDEX);
        node.make_free(5);
        assert!(!node.is_live());
        assert_eq!(node.next_free(), 5);
        assert_eq!(node.next_using(), INVALID_INDEX);
    }
}
