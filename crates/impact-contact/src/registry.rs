//! Pooled collision records with a two-level pair index.
//!
//! Records live in a flat `Vec<CollisionInfo>` and are recycled through a
//! free list, so steady-state stepping allocates nothing. Pairs are found
//! through `index[lower][higher]`, an insertion-ordered two-level map.
//!
//! Two id lists name the records touched in the current and previous
//! frame. Each step begins by swapping them and clearing the new
//! current list; whatever remains in the previous list after the update
//! pass and is not touched again is an exit.

use impact_core::{ColliderId, FrameId};
use indexmap::IndexMap;
use tracing::debug;

use crate::info::{CollisionInfo, RecordId};

/// Pair-keyed collision records, pooled and double-buffered by frame.
#[derive(Clone, Debug, Default)]
pub struct CollisionRegistry {
    records: Vec<CollisionInfo>,
    free: Vec<RecordId>,
    index: IndexMap<ColliderId, IndexMap<ColliderId, RecordId>>,
    current: Vec<RecordId>,
    previous: Vec<RecordId>,
}

impl CollisionRegistry {
    /// Create a registry with `capacity` records pre-pooled.
    pub fn with_capacity(capacity: usize) -> Self {
        let records: Vec<CollisionInfo> = (0..capacity).map(|_| CollisionInfo::vacant()).collect();
        // Pop from the back hands out low indices first.
        let free = (0..capacity as u32).rev().map(RecordId).collect();
        Self {
            records,
            free,
            index: IndexMap::new(),
            current: Vec::with_capacity(capacity),
            previous: Vec::with_capacity(capacity),
        }
    }

    /// Look up the record for a pair, given in canonical order.
    pub fn find(&self, lower: ColliderId, higher: ColliderId) -> Option<RecordId> {
        self.index.get(&lower)?.get(&higher).copied()
    }

    /// Look up or create the record for a pair, given in canonical order.
    pub(crate) fn find_or_create(&mut self, lower: ColliderId, higher: ColliderId) -> RecordId {
        debug_assert!(lower < higher, "pair not canonical: {lower} >= {higher}");
        let records = &mut self.records;
        let free = &mut self.free;
        *self
            .index
            .entry(lower)
            .or_default()
            .entry(higher)
            .or_insert_with(|| {
                let id = free.pop().unwrap_or_else(|| {
                    records.push(CollisionInfo::vacant());
                    debug!(records = records.len(), "collision record pool grew");
                    RecordId((records.len() - 1) as u32)
                });
                records[id.index()].assign(lower, higher);
                id
            })
    }

    /// Unlink a record from the index and return it to the pool.
    pub(crate) fn release(&mut self, id: RecordId) {
        let info = &mut self.records[id.index()];
        if !info.is_in_use() {
            debug_assert!(false, "collision record {} released twice", id.index());
            return;
        }
        let (lower, higher) = (info.collider_a(), info.collider_b());
        info.reset();
        if let Some(inner) = self.index.get_mut(&lower) {
            inner.swap_remove(&higher);
        }
        self.free.push(id);
    }

    /// Drop empty inner maps whose outer collider is gone.
    pub(crate) fn prune(&mut self, is_live: impl Fn(ColliderId) -> bool) {
        self.index
            .retain(|&lower, inner| !inner.is_empty() || is_live(lower));
    }

    /// Swap the frame lists and clear the new current list.
    pub(crate) fn begin_frame(&mut self) {
        std::mem::swap(&mut self.current, &mut self.previous);
        self.current.clear();
    }

    /// Stamp a touch in `frame`, adding the record to the current list on
    /// its first touch this frame.
    pub(crate) fn touch(&mut self, id: RecordId, frame: FrameId, is_trigger: bool) {
        if self.records[id.index()].touch(frame, is_trigger) {
            self.current.push(id);
        }
    }

    /// Borrow a record.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this registry.
    pub fn get(&self, id: RecordId) -> &CollisionInfo {
        &self.records[id.index()]
    }

    pub(crate) fn get_mut(&mut self, id: RecordId) -> &mut CollisionInfo {
        &mut self.records[id.index()]
    }

    /// Records touched this frame, in first-touch order.
    pub fn current(&self) -> &[RecordId] {
        &self.current
    }

    /// Records touched last frame.
    pub fn previous(&self) -> &[RecordId] {
        &self.previous
    }

    pub(crate) fn take_previous(&mut self) -> Vec<RecordId> {
        std::mem::take(&mut self.previous)
    }

    pub(crate) fn restore_previous(&mut self, previous: Vec<RecordId>) {
        debug_assert!(self.previous.is_empty());
        self.previous = previous;
    }

    /// Records currently assigned to a pair.
    pub fn live(&self) -> usize {
        self.records.len() - self.free.len()
    }

    /// Records sitting in the pool.
    pub fn pooled(&self) -> usize {
        self.free.len()
    }

    /// Records ever allocated. Never shrinks.
    pub fn capacity(&self) -> usize {
        self.records.len()
    }

    /// Outer index entries, one per lower collider with any history.
    pub fn indexed_colliders(&self) -> usize {
        self.index.len()
    }

    /// Live records, in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (RecordId, &CollisionInfo)> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, info)| info.is_in_use())
            .map(|(i, info)| (RecordId(i as u32), info))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(a: u32, b: u32) -> (ColliderId, ColliderId) {
        (ColliderId(a), ColliderId(b))
    }

    #[test]
    fn find_or_create_is_idempotent() {
        let mut reg = CollisionRegistry::with_capacity(2);
        let (a, b) = ids(1, 2);
        let r1 = reg.find_or_create(a, b);
        let r2 = reg.find_or_create(a, b);
        assert_eq!(r1, r2);
        assert_eq!(reg.find(a, b), Some(r1));
        assert_eq!(reg.find(b, a), None);
        assert_eq!(reg.live(), 1);
        assert_eq!(reg.get(r1).collider_a(), a);
        assert_eq!(reg.get(r1).collider_b(), b);
    }

    #[test]
    fn release_recycles_without_growth() {
        let mut reg = CollisionRegistry::with_capacity(1);
        let r = reg.find_or_create(ColliderId(0), ColliderId(1));
        reg.release(r);
        assert_eq!(reg.find(ColliderId(0), ColliderId(1)), None);
        assert_eq!(reg.pooled(), 1);
        let r2 = reg.find_or_create(ColliderId(2), ColliderId(3));
        assert_eq!(r2, r);
        assert_eq!(reg.capacity(), 1);
    }

    #[test]
    fn grows_when_pool_is_empty() {
        let mut reg = CollisionRegistry::with_capacity(0);
        reg.find_or_create(ColliderId(0), ColliderId(1));
        reg.find_or_create(ColliderId(0), ColliderId(2));
        assert_eq!(reg.capacity(), 2);
        assert_eq!(reg.live(), 2);
        assert_eq!(reg.iter().count(), 2);
    }

    #[test]
    fn begin_frame_ping_pongs_lists() {
        let mut reg = CollisionRegistry::with_capacity(4);
        let r = reg.find_or_create(ColliderId(0), ColliderId(1));
        reg.begin_frame();
        reg.touch(r, FrameId(1), false);
        reg.touch(r, FrameId(1), false);
        assert_eq!(reg.current(), &[r]);
        reg.begin_frame();
        assert!(reg.current().is_empty());
        assert_eq!(reg.previous(), &[r]);
    }

    #[test]
    fn prune_keeps_live_or_nonempty_entries() {
        let mut reg = CollisionRegistry::with_capacity(4);
        let r = reg.find_or_create(ColliderId(0), ColliderId(1));
        reg.find_or_create(ColliderId(2), ColliderId(3));
        reg.release(r);
        assert_eq!(reg.indexed_colliders(), 2);
        reg.prune(|id| id != ColliderId(0));
        assert_eq!(reg.indexed_colliders(), 1);
        // Non-empty inner maps survive even if the outer collider is gone.
        reg.prune(|_| false);
        assert_eq!(reg.indexed_colliders(), 1);
    }

    #[test]
    #[should_panic(expected = "released twice")]
    #[cfg(debug_assertions)]
    fn double_release_asserts_in_debug() {
        let mut reg = CollisionRegistry::with_capacity(1);
        let r = reg.find_or_create(ColliderId(0), ColliderId(1));
        reg.release(r);
        reg.release(r);
    }
}
