//! Fixed-size blocks of transform slots.
//!
//! A [`Unit`] is one contiguous allocation of `nodes_per_unit` slots. Every
//! slot sits on exactly one of two intrusive lists threaded through the
//! slots themselves:
//!
//! - the **free list**, singly linked from `head_free`;
//! - the **using list**, doubly linked and anchored at `tail_using`.
//!
//! `pop` unlinks the free head and appends it at the using tail; `push`
//! unlinks an arbitrary live slot, patching both neighbours, and prepends
//! it to the free list. Both are O(1).

use impact_core::UnitId;

use crate::error::ArenaError;
use crate::node::{TransformNode, INVALID_INDEX};

/// Slot counts for one unit, produced by walking both lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnitStats {
    /// The unit that was walked.
    pub unit: UnitId,
    /// Slots reachable from the free head.
    pub free: u32,
    /// Slots reachable from the using tail.
    pub using: u32,
    /// Slots carved at construction.
    pub total: u32,
}

/// A contiguous block of transform slots with intrusive free/using lists.
pub struct Unit {
    id: UnitId,
    nodes: Box<[TransformNode]>,
    head_free: u32,
    tail_using: u32,
    live: u32,
}

impl Unit {
    /// Carve a new unit with every slot free, linked in index order.
    pub fn new(id: UnitId, node_count: u32) -> Self {
        let nodes: Box<[TransformNode]> = (0..node_count)
            .map(|i| {
                let next = if i + 1 < node_count { i + 1 } else { INVALID_INDEX };
                TransformNode::free(next)
            })
            .collect();
        Self {
            id,
            nodes,
            head_free: if node_count > 0 { 0 } else { INVALID_INDEX },
            tail_using: INVALID_INDEX,
            live: 0,
        }
    }

    /// This unit's id.
    pub fn id(&self) -> UnitId {
        self.id
    }

    /// Whether at least one slot is free.
    pub fn has_space(&self) -> bool {
        self.head_free != INVALID_INDEX
    }

    /// Number of slots on the using list.
    pub fn live(&self) -> u32 {
        self.live
    }

    /// Total slots in this unit.
    pub fn capacity(&self) -> u32 {
        self.nodes.len() as u32
    }

    /// Take the free head and append it to the using tail.
    ///
    /// Returns the slot index, or `None` if the unit is full.
    pub fn pop(&mut self) -> Option<u32> {
        if self.head_free == INVALID_INDEX {
            return None;
        }
        let index = self.head_free;
        let tail = self.tail_using;

        let node = &mut self.nodes[index as usize];
        self.head_free = node.next_free();
        node.make_live(tail);

        if tail != INVALID_INDEX {
            self.nodes[tail as usize].set_next_using(index);
        }
        self.tail_using = index;
        self.live += 1;
        Some(index)
    }

    /// Unlink a live slot from the using list and prepend it to the free list.
    ///
    /// Fails without touching either list if the slot is out of range or
    /// not currently live.
    pub fn push(&mut self, index: u32) -> Result<(), ArenaError> {
        let Some(node) = self.nodes.get(index as usize) else {
            return Err(ArenaError::ForeignView {
                unit: self.id,
                index,
            });
        };
        if !node.is_live() {
            return Err(ArenaError::NotLive {
                unit: self.id,
                index,
            });
        }
        let prev = node.prev_using();
        let next = node.next_using();

        if prev != INVALID_INDEX {
            self.nodes[prev as usize].set_next_using(next);
        }
        if next != INVALID_INDEX {
            self.nodes[next as usize].set_prev_using(prev);
        }
        if self.tail_using == index {
            self.tail_using = prev;
        }

        self.nodes[index as usize].make_free(self.head_free);
        self.head_free = index;
        self.live -= 1;
        Ok(())
    }

    /// Shared access to a slot.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn node(&self, index: u32) -> &TransformNode {
        &self.nodes[index as usize]
    }

    /// Mutable access to a slot.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn node_mut(&mut self, index: u32) -> &mut TransformNode {
        &mut self.nodes[index as usize]
    }

    /// Live slot indices, oldest first.
    pub fn live_indices(&self) -> Vec<u32> {
        let mut out = Vec::with_capacity(self.live as usize);
        let mut cur = self.tail_using;
        while cur != INVALID_INDEX && out.len() < self.nodes.len() {
            out.push(cur);
            cur = self.nodes[cur as usize].prev_using();
        }
        out.reverse();
        out
    }

    /// The unit's storage as raw words, in slot order.
    pub fn as_words(&self) -> &[u32] {
        bytemuck::cast_slice(&self.nodes[..])
    }

    /// The unit's storage reinterpreted as floats (link words included).
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.nodes[..])
    }

    /// Memory used by the slot storage, in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.nodes.len() * std::mem::size_of::<TransformNode>()
    }

    /// Walk both lists and count their members.
    pub fn stats(&self) -> UnitStats {
        let bound = self.nodes.len();
        let mut free = 0u32;
        let mut cur = self.head_free;
        while cur != INVALID_INDEX && (free as usize) < bound {
            free += 1;
            cur = self.nodes[cur as usize].next_free();
        }
        let mut using = 0u32;
        let mut cur = self.tail_using;
        while cur != INVALID_INDEX && (using as usize) < bound {
            using += 1;
            cur = self.nodes[cur as usize].prev_using();
        }
        UnitStats {
            unit: self.id,
            free,
            using,
            total: self.capacity(),
        }
    }

    /// Verify that the free and using lists partition every slot.
    ///
    /// Checks that each list only visits slots of the right kind, that
    /// nothing is visited twice, that the using list's forward and backward
    /// links agree, and that the union covers the whole unit.
    pub fn check_integrity(&self) -> Result<(), ArenaError> {
        let corrupt = |reason: String| ArenaError::CorruptedLists {
            unit: self.id,
            reason,
        };
        let n = self.nodes.len();
        let mut seen = vec![false; n];

        let mut cur = self.head_free;
        while cur != INVALID_INDEX {
            let i = cur as usize;
            if i >= n {
                return Err(corrupt(format!("free link {cur} out of range")));
            }
            if seen[i] {
                return Err(corrupt(format!("slot {cur} visited twice on free list")));
            }
            seen[i] = true;
            if self.nodes[i].is_live() {
                return Err(corrupt(format!("live slot {cur} on free list")));
            }
            cur = self.nodes[i].next_free();
        }

        let mut using = 0u32;
        let mut expected_next = INVALID_INDEX;
        let mut cur = self.tail_using;
        while cur != INVALID_INDEX {
            let i = cur as usize;
            if i >= n {
                return Err(corrupt(format!("using link {cur} out of range")));
            }
            if seen[i] {
                return Err(corrupt(format!("slot {cur} on both lists or looped")));
            }
            seen[i] = true;
            let node = &self.nodes[i];
            if !node.is_live() {
                return Err(corrupt(format!("free slot {cur} on using list")));
            }
            if node.next_using() != expected_next {
                return Err(corrupt(format!(
                    "slot {cur} next link {} disagrees with walk {expected_next}",
                    node.next_using()
                )));
            }
            using += 1;
            expected_next = cur;
            cur = node.prev_using();
        }

        if let Some(missing) = seen.iter().position(|s| !s) {
            return Err(corrupt(format!("slot {missing} on neither list")));
        }
        if using != self.live {
            return Err(corrupt(format!(
                "live counter {} but using list has {using}",
                self.live
            )));
        }
        Ok(())
    }
}
