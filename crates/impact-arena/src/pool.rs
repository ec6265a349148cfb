//! The transform arena: a growable pool of [`Unit`]s.
//!
//! [`TransformArena::acquire`] searches units in *find order*, a soft cache
//! that keeps the unit most recently found with free space at the front.
//! In the common case the first unit checked satisfies the pop, so
//! acquisition is O(1) rather than O(units). When no unit has space,
//! exactly one new unit is appended; units are never shrunk.

use std::sync::atomic::{AtomicU32, Ordering};

use impact_core::UnitId;
use tracing::{debug, error};

use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::handle::SlotView;
use crate::node::TransformNode;
use crate::unit::{Unit, UnitStats};

/// Aggregate slot counts across the whole arena.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArenaStats {
    /// Units allocated.
    pub units: usize,
    /// Slots currently handed out.
    pub live: usize,
    /// Slots available without growing.
    pub free: usize,
    /// Bytes of slot storage across all units.
    pub memory_bytes: usize,
}

/// Tags handed to arenas so views can be traced back to their issuer.
static NEXT_ARENA_TAG: AtomicU32 = AtomicU32::new(0);

/// Pooled allocator for per-node transform slots.
///
/// Not thread-safe; owned by whichever scene graph drives it.
pub struct TransformArena {
    tag: u32,
    units: Vec<Unit>,
    /// Indices into `units`, in search order.
    find_order: Vec<usize>,
    config: ArenaConfig,
    live: usize,
}

impl TransformArena {
    /// Create an arena with `config.initial_units` pre-carved units.
    pub fn new(config: ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        let units: Vec<Unit> = (0..config.initial_units)
            .map(|i| Unit::new(UnitId(i), config.nodes_per_unit))
            .collect();
        let find_order = (0..units.len()).collect();
        Ok(Self {
            tag: NEXT_ARENA_TAG.fetch_add(1, Ordering::Relaxed),
            units,
            find_order,
            config,
            live: 0,
        })
    }

    /// Hand out a free slot, growing by one unit if every unit is full.
    ///
    /// The slot starts with identity TRS and matrices and all dirty bits
    /// set. Fails only when `max_units` is configured and reached.
    pub fn acquire(&mut self) -> Result<SlotView, ArenaError> {
        let found = self
            .find_order
            .iter()
            .position(|&u| self.units[u].has_space());
        let pos = match found {
            Some(pos) => pos,
            None => self.grow()?,
        };

        // Keep the unit that just had space at the front of the search.
        if pos != 0 {
            self.find_order.swap(0, pos);
        }

        let unit_index = self.find_order[0];
        let unit = &mut self.units[unit_index];
        let index = unit.pop().ok_or_else(|| ArenaError::CorruptedLists {
            unit: unit.id(),
            reason: "unit reported space but its free list is empty".into(),
        })?;
        self.live += 1;
        Ok(SlotView::new(self.tag, unit.id(), index))
    }

    /// Return a slot to its unit's free list. O(1).
    ///
    /// Releasing a view from another arena, or a slot that is not live, is
    /// a caller bug: it asserts in debug builds and is logged and ignored
    /// in release builds, leaving both lists untouched.
    pub fn release(&mut self, view: SlotView) {
        let unit = if view.arena == self.tag {
            self.units.get_mut(view.unit.0 as usize)
        } else {
            None
        };
        let result = match unit {
            Some(unit) => unit.push(view.index),
            None => Err(ArenaError::ForeignView {
                unit: view.unit,
                index: view.index,
            }),
        };
        match result {
            Ok(()) => self.live -= 1,
            Err(e) => {
                debug_assert!(false, "invalid transform slot release: {e}");
                error!(%e, "ignoring invalid transform slot release");
            }
        }
    }

    fn grow(&mut self) -> Result<usize, ArenaError> {
        let count = self.units.len();
        if let Some(max_units) = self.config.max_units {
            if count >= max_units as usize {
                return Err(ArenaError::CapacityExceeded {
                    units: count as u32,
                    max_units,
                });
            }
        }
        let id = UnitId(count as u32);
        self.units.push(Unit::new(id, self.config.nodes_per_unit));
        self.find_order.push(count);
        debug!(unit = %id, nodes = self.config.nodes_per_unit, "transform arena grew");
        Ok(self.find_order.len() - 1)
    }

    /// Shared access to the slot behind `view`.
    ///
    /// # Panics
    ///
    /// Panics if `view` was not produced by this arena.
    pub fn node(&self, view: &SlotView) -> &TransformNode {
        debug_assert_eq!(view.arena, self.tag, "slot view from another arena");
        self.units[view.unit.0 as usize].node(view.index)
    }

    /// Mutable access to the slot behind `view`.
    ///
    /// # Panics
    ///
    /// Panics if `view` was not produced by this arena.
    pub fn node_mut(&mut self, view: &SlotView) -> &mut TransformNode {
        debug_assert_eq!(view.arena, self.tag, "slot view from another arena");
        self.units[view.unit.0 as usize].node_mut(view.index)
    }

    /// Number of slots currently handed out.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Whether no slots are handed out.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of units allocated.
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// Total slots across all units.
    pub fn capacity(&self) -> usize {
        self.units.len() * self.config.nodes_per_unit as usize
    }

    /// Look up a unit by id.
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(id.0 as usize)
    }

    /// All units, in allocation order.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter()
    }

    /// The configuration this arena was built with.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Aggregate counts.
    pub fn stats(&self) -> ArenaStats {
        ArenaStats {
            units: self.units.len(),
            live: self.live,
            free: self.capacity() - self.live,
            memory_bytes: self.units.iter().map(Unit::memory_bytes).sum(),
        }
    }

    /// Per-unit counts obtained by walking every list.
    pub fn unit_stats(&self) -> Vec<UnitStats> {
        self.units.iter().map(Unit::stats).collect()
    }

    /// Verify the free/using partition of every unit and the live counter.
    pub fn check_integrity(&self) -> Result<(), ArenaError> {
        for unit in &self.units {
            unit.check_integrity()?;
        }
        let counted: usize = self.units.iter().map(|u| u.live() as usize).sum();
        if counted != self.live {
            return Err(ArenaError::CorruptedLists {
                unit: UnitId(0),
                reason: format!("arena live counter {} but units hold {counted}", self.live),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_arena(nodes: u32) -> TransformArena {
        TransformArena::new(ArenaConfig::new(nodes)).unwrap()
    }

    #[test]
    fn acquire_fills_first_unit_then_grows_one() {
        let mut arena = small_arena(4);
        let views: Vec<_> = (0..5).map(|_| arena.acquire().unwrap()).collect();
        assert_eq!(arena.unit_count(), 2);
        assert_eq!(arena.len(), 5);
        assert!(views[..4].iter().all(|v| v.unit() == UnitId(0)));
        assert_eq!(views[4].unit(), UnitId(1));
        for v in views {
            arena.release(v);
        }
        assert!(arena.is_empty());
        arena.check_integrity().unwrap();
    }

    #[test]
    fn find_order_prefers_unit_with_space() {
        let mut arena = small_arena(2);
        let a = arena.acquire().unwrap();
        let _b = arena.acquire().unwrap();
        let c = arena.acquire().unwrap(); // grows unit 1, moved to the front
        assert_eq!(c.unit(), UnitId(1));

        // Free a slot in unit 0; unit 1 still has space and stays in front.
        arena.release(a);
        let d = arena.acquire().unwrap();
        assert_eq!(d.unit(), UnitId(1));

        // Unit 1 is now full, so the search falls back to unit 0.
        let e = arena.acquire().unwrap();
        assert_eq!(e.unit(), UnitId(0));
        assert_eq!(arena.unit_count(), 2);
    }

    #[test]
    fn capacity_exceeded_when_bounded() {
        let config = ArenaConfig {
            max_units: Some(1),
            ..ArenaConfig::new(2)
        };
        let mut arena = TransformArena::new(config).unwrap();
        let _a = arena.acquire().unwrap();
        let _b = arena.acquire().unwrap();
        assert_eq!(
            arena.acquire(),
            Err(ArenaError::CapacityExceeded {
                units: 1,
                max_units: 1
            })
        );
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn writes_through_view_land_in_unit_storage() {
        let mut arena = small_arena(4);
        let v = arena.acquire().unwrap();
        arena.node_mut(&v).set_position([1.0, 2.0, 3.0]);
        arena.node_mut(&v).world_matrix_mut()[12] = 9.0;
        assert_eq!(arena.node(&v).position(), [1.0, 2.0, 3.0]);

        let unit = arena.unit(v.unit()).unwrap();
        let floats = unit.as_floats();
        assert_eq!(floats[v.offset() + crate::node::TRS_WORD_OFFSET], 1.0);
        assert_eq!(
            floats[v.offset() + crate::node::WORLD_MATRIX_WORD_OFFSET + 12],
            9.0
        );
        arena.release(v);
    }

    #[test]
    fn stats_track_live_and_free() {
        let mut arena = small_arena(8);
        let a = arena.acquire().unwrap();
        let _b = arena.acquire().unwrap();
        arena.release(a);
        let stats = arena.stats();
        assert_eq!(stats.units, 1);
        assert_eq!(stats.live, 1);
        assert_eq!(stats.free, 7);
        assert_eq!(stats.memory_bytes, 8 * 45 * 4);

        let per_unit = arena.unit_stats();
        assert_eq!(per_unit.len(), 1);
        assert_eq!(per_unit[0].using, 1);
        assert_eq!(per_unit[0].free, 7);
        assert_eq!(per_unit[0].total, 8);
    }

    #[test]
    fn initial_units_are_precarved() {
        let config = ArenaConfig {
            initial_units: 3,
            ..ArenaConfig::new(2)
        };
        let arena = TransformArena::new(config).unwrap();
        assert_eq!(arena.unit_count(), 3);
        assert_eq!(arena.capacity(), 6);
    }

    #[test]
    #[should_panic(expected = "invalid transform slot release")]
    #[cfg(debug_assertions)]
    fn foreign_release_asserts_in_debug() {
        let mut big = small_arena(2);
        let mut other = small_arena(2);
        let _x = big.acquire().unwrap();
        let _y = big.acquire().unwrap();
        let foreign = big.acquire().unwrap(); // lives in unit 1
        other.release(foreign);
    }

    #[test]
    #[should_panic(expected = "invalid transform slot release")]
    #[cfg(debug_assertions)]
    fn release_rejects_view_aliasing_a_live_slot_elsewhere() {
        let mut mine = small_arena(2);
        let mut theirs = small_arena(2);
        let _held = theirs.acquire().unwrap();
        // Same unit and index as `_held`, but issued by `mine`.
        let foreign = mine.acquire().unwrap();
        theirs.release(foreign);
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn release_ignores_view_aliasing_a_live_slot_elsewhere() {
        let mut mine = small_arena(2);
        let mut theirs = small_arena(2);
        let held = theirs.acquire().unwrap();
        let foreign = mine.acquire().unwrap();
        theirs.release(foreign);
        assert_eq!(theirs.len(), 1);
        theirs.check_integrity().unwrap();
        theirs.release(held);
        assert!(theirs.is_empty());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn live_count_is_acquires_minus_releases(
                ops in proptest::collection::vec(any::<(bool, u8)>(), 1..200),
            ) {
                let mut arena = small_arena(8);
                let mut views = Vec::new();
                let mut acquires = 0usize;
                let mut releases = 0usize;
                for (acquire, pick) in ops {
                    if acquire || views.is_empty() {
                        views.push(arena.acquire().unwrap());
                        acquires += 1;
                    } else {
                        let i = pick as usize % views.len();
                        arena.release(views.swap_remove(i));
                        releases += 1;
                    }
                }
                prop_assert_eq!(arena.len(), acquires - releases);

                // No two live views alias the same slot.
                let distinct: std::collections::HashSet<_> =
                    views.iter().map(|v| (v.unit(), v.offset())).collect();
                prop_assert_eq!(distinct.len(), views.len());
            }

            #[test]
            fn lists_partition_every_slot(
                ops in proptest::collection::vec(any::<(bool, u8)>(), 1..200),
            ) {
                let mut arena = small_arena(5);
                let mut views = Vec::new();
                for (acquire, pick) in ops {
                    if acquire || views.is_empty() {
                        views.push(arena.acquire().unwrap());
                    } else {
                        let i = pick as usize % views.len();
                        arena.release(views.swap_remove(i));
                    }
                    prop_assert!(arena.check_integrity().is_ok());
                }
                let walked: u32 = arena.unit_stats().iter().map(|s| s.free + s.using).sum();
                prop_assert_eq!(walked as usize, arena.capacity());
            }
        }
    }
}
