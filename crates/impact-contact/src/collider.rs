//! Collider side table.
//!
//! The narrow phase only knows bodies by an integer user index. The
//! [`ColliderTable`] maps that index back to everything the contact
//! pipeline needs: trigger flag, callback subscriptions, collision filter,
//! and the listeners attached to the collider.

use std::fmt;

use impact_core::ColliderId;
use indexmap::IndexMap;

use crate::error::ContactError;
use crate::event::EventCategory;
use crate::listener::ContactListener;

/// Collision group/mask pair.
///
/// Two colliders interact only if each one's group intersects the other's
/// mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CollisionFilter {
    /// Groups this collider belongs to.
    pub group: u32,
    /// Groups this collider interacts with.
    pub mask: u32,
}

impl CollisionFilter {
    /// Member of group 1, interacts with group 1.
    pub const DEFAULT: Self = Self { group: 1, mask: 1 };
    /// Member of every group, interacts with every group.
    pub const ALL: Self = Self {
        group: u32::MAX,
        mask: u32::MAX,
    };

    /// Whether `self` and `other` interact.
    pub fn allows(&self, other: &Self) -> bool {
        (self.group & other.mask) != 0 && (other.group & self.mask) != 0
    }

    /// Join the groups in `bits`.
    pub fn add_group(&mut self, bits: u32) {
        self.group |= bits;
    }

    /// Leave the groups in `bits`.
    pub fn remove_group(&mut self, bits: u32) {
        self.group &= !bits;
    }

    /// Start interacting with the groups in `bits`.
    pub fn add_mask(&mut self, bits: u32) {
        self.mask |= bits;
    }

    /// Stop interacting with the groups in `bits`.
    pub fn remove_mask(&mut self, bits: u32) {
        self.mask &= !bits;
    }
}

impl Default for CollisionFilter {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Description of a collider to register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColliderDesc {
    /// Overlap-only volume: produces trigger events, never contact points.
    pub is_trigger: bool,
    /// Record contact points and deliver collision callbacks.
    pub collision_callbacks: bool,
    /// Deliver trigger callbacks.
    pub trigger_callbacks: bool,
    /// Group/mask filter.
    pub filter: CollisionFilter,
}

impl ColliderDesc {
    /// A physical collider that wants collision callbacks.
    pub fn solid() -> Self {
        Self {
            is_trigger: false,
            collision_callbacks: true,
            trigger_callbacks: true,
            filter: CollisionFilter::DEFAULT,
        }
    }

    /// A trigger volume.
    pub fn trigger() -> Self {
        Self {
            is_trigger: true,
            collision_callbacks: false,
            trigger_callbacks: true,
            filter: CollisionFilter::DEFAULT,
        }
    }

    /// A physical collider with no callbacks of its own.
    pub fn silent() -> Self {
        Self {
            is_trigger: false,
            collision_callbacks: false,
            trigger_callbacks: false,
            filter: CollisionFilter::DEFAULT,
        }
    }

    /// Replace the filter.
    pub fn with_filter(mut self, filter: CollisionFilter) -> Self {
        self.filter = filter;
        self
    }
}

impl Default for ColliderDesc {
    fn default() -> Self {
        Self::solid()
    }
}

/// A registered collider.
pub struct Collider {
    id: ColliderId,
    is_trigger: bool,
    collision_callbacks: bool,
    trigger_callbacks: bool,
    filter: CollisionFilter,
    pub(crate) listeners: Vec<Box<dyn ContactListener>>,
}

impl Collider {
    fn new(id: ColliderId, desc: ColliderDesc) -> Self {
        Self {
            id,
            is_trigger: desc.is_trigger,
            collision_callbacks: desc.collision_callbacks,
            trigger_callbacks: desc.trigger_callbacks,
            filter: desc.filter,
            listeners: Vec::new(),
        }
    }

    /// This collider's id.
    pub fn id(&self) -> ColliderId {
        self.id
    }

    /// Whether this collider is a trigger volume.
    pub fn is_trigger(&self) -> bool {
        self.is_trigger
    }

    /// Switch between trigger and physical. Takes effect for new streaks;
    /// a pair already touching keeps its category until it exits.
    pub fn set_trigger(&mut self, is_trigger: bool) {
        self.is_trigger = is_trigger;
    }

    /// Whether contact points are recorded and collision callbacks delivered.
    pub fn wants_collision_callbacks(&self) -> bool {
        self.collision_callbacks
    }

    /// Toggle collision callbacks.
    pub fn set_collision_callbacks(&mut self, enabled: bool) {
        self.collision_callbacks = enabled;
    }

    /// Whether trigger callbacks are delivered.
    pub fn wants_trigger_callbacks(&self) -> bool {
        self.trigger_callbacks
    }

    /// Toggle trigger callbacks.
    pub fn set_trigger_callbacks(&mut self, enabled: bool) {
        self.trigger_callbacks = enabled;
    }

    /// Whether this collider currently requests `category` callbacks.
    pub fn wants(&self, category: EventCategory) -> bool {
        match category {
            EventCategory::Trigger => self.trigger_callbacks,
            EventCategory::Collision => self.collision_callbacks,
        }
    }

    /// Group/mask filter.
    pub fn filter(&self) -> &CollisionFilter {
        &self.filter
    }

    /// Mutable group/mask filter.
    pub fn filter_mut(&mut self) -> &mut CollisionFilter {
        &mut self.filter
    }

    /// Number of attached listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for Collider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collider")
            .field("id", &self.id)
            .field("is_trigger", &self.is_trigger)
            .field("collision_callbacks", &self.collision_callbacks)
            .field("trigger_callbacks", &self.trigger_callbacks)
            .field("filter", &self.filter)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Registered colliders, keyed by id.
///
/// Ids increase monotonically and are never reused, so a destroyed id
/// stays invalid for the rest of the table's life.
#[derive(Debug, Default)]
pub struct ColliderTable {
    colliders: IndexMap<ColliderId, Collider>,
    next_id: u32,
    destroyed_since_prune: bool,
}

impl ColliderTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collider and return its id.
    pub fn register(&mut self, desc: ColliderDesc) -> Result<ColliderId, ContactError> {
        // u32::MAX is reserved for ColliderId::NONE.
        if self.next_id == u32::MAX {
            return Err(ContactError::IdsExhausted);
        }
        let id = ColliderId(self.next_id);
        self.next_id += 1;
        self.colliders.insert(id, Collider::new(id, desc));
        Ok(id)
    }

    /// Remove a collider and drop its listeners.
    ///
    /// Returns `false` if `id` was not registered.
    pub fn destroy(&mut self, id: ColliderId) -> bool {
        let removed = self.colliders.swap_remove(&id).is_some();
        self.destroyed_since_prune |= removed;
        removed
    }

    /// Whether `id` names a live collider.
    pub fn contains(&self, id: ColliderId) -> bool {
        self.colliders.contains_key(&id)
    }

    /// Look up a collider.
    pub fn get(&self, id: ColliderId) -> Option<&Collider> {
        self.colliders.get(&id)
    }

    /// Look up a collider mutably.
    pub fn get_mut(&mut self, id: ColliderId) -> Option<&mut Collider> {
        self.colliders.get_mut(&id)
    }

    /// Attach a listener to a collider.
    pub fn add_listener(
        &mut self,
        id: ColliderId,
        listener: Box<dyn ContactListener>,
    ) -> Result<(), ContactError> {
        let collider = self
            .colliders
            .get_mut(&id)
            .ok_or(ContactError::UnknownCollider { id })?;
        collider.listeners.push(listener);
        Ok(())
    }

    /// Number of live colliders.
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Whether no colliders are registered.
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Live colliders in registration order, perturbed by removals.
    pub fn iter(&self) -> impl Iterator<Item = &Collider> {
        self.colliders.values()
    }

    /// Report and clear whether anything was destroyed since the last call.
    pub(crate) fn take_destroyed(&mut self) -> bool {
        std::mem::take(&mut self.destroyed_since_prune)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic_and_never_reused() {
        let mut table = ColliderTable::new();
        let a = table.register(ColliderDesc::solid()).unwrap();
        let b = table.register(ColliderDesc::trigger()).unwrap();
        assert!(a < b);
        assert!(table.destroy(a));
        assert!(!table.contains(a));
        let c = table.register(ColliderDesc::solid()).unwrap();
        assert!(c > b);
        assert_ne!(c, a);
        assert!(!table.destroy(a));
    }

    #[test]
    fn destroy_sets_prune_flag_once() {
        let mut table = ColliderTable::new();
        let a = table.register(ColliderDesc::solid()).unwrap();
        assert!(!table.take_destroyed());
        table.destroy(a);
        assert!(table.take_destroyed());
        assert!(!table.take_destroyed());
    }

    #[test]
    fn add_listener_to_unknown_collider_fails() {
        struct Nop;
        impl ContactListener for Nop {}

        let mut table = ColliderTable::new();
        assert_eq!(
            table.add_listener(ColliderId(3), Box::new(Nop)),
            Err(ContactError::UnknownCollider { id: ColliderId(3) })
        );
        let a = table.register(ColliderDesc::solid()).unwrap();
        table.add_listener(a, Box::new(Nop)).unwrap();
        assert_eq!(table.get(a).unwrap().listener_count(), 1);
    }

    #[test]
    fn filter_is_symmetric_group_mask_test() {
        let player = CollisionFilter { group: 0b01, mask: 0b11 };
        let ghost = CollisionFilter { group: 0b10, mask: 0b00 };
        assert!(!player.allows(&ghost));
        assert!(!ghost.allows(&player));

        let mut ghost = ghost;
        ghost.add_mask(0b01);
        assert!(player.allows(&ghost));

        let mut player = player;
        player.remove_mask(0b10);
        assert!(!player.allows(&ghost));
        player.add_mask(0b10);
        player.remove_group(0b01);
        assert!(!player.allows(&ghost));
        player.add_group(0b01);
        assert!(player.allows(&ghost));
    }

    #[test]
    fn wants_follows_flags() {
        let mut table = ColliderTable::new();
        let a = table.register(ColliderDesc::silent()).unwrap();
        let c = table.get_mut(a).unwrap();
        assert!(!c.wants(EventCategory::Collision));
        c.set_collision_callbacks(true);
        assert!(c.wants(EventCategory::Collision));
        assert!(!c.wants(EventCategory::Trigger));
    }
}
