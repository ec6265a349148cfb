//! Callback interface for contact events.

use impact_core::{ColliderId, FrameId};

use crate::collider::{Collider, ColliderTable};
use crate::contact::Contact;
use crate::event::Interest;
use crate::info::CollisionInfo;
use crate::pool::ContactPool;

/// Receives Enter/Stay/Exit events for the collider it is attached to.
///
/// Every method has an empty default, so implementors override only what
/// they need. Callbacks run synchronously inside
/// [`ContactWorld::step`](crate::ContactWorld::step), after all contact
/// bookkeeping for the frame is done. A listener may destroy colliders
/// through the [`DispatchContext`], its own included; later callbacks for
/// a destroyed collider are skipped.
pub trait ContactListener {
    /// Categories this listener subscribes to. Defaults to all.
    fn interest(&self) -> Interest {
        Interest::ALL
    }

    /// A trigger pair started overlapping.
    fn on_trigger_enter(&mut self, _ctx: &mut DispatchContext<'_>, _other: ColliderId) {}

    /// A trigger pair is still overlapping.
    fn on_trigger_stay(&mut self, _ctx: &mut DispatchContext<'_>, _other: ColliderId) {}

    /// A trigger pair stopped overlapping.
    fn on_trigger_exit(&mut self, _ctx: &mut DispatchContext<'_>, _other: ColliderId) {}

    /// A physical pair started touching.
    fn on_collision_enter(&mut self, _ctx: &mut DispatchContext<'_>, _collision: &Collision<'_>) {}

    /// A physical pair is still touching.
    fn on_collision_stay(&mut self, _ctx: &mut DispatchContext<'_>, _collision: &Collision<'_>) {}

    /// A physical pair stopped touching. Carries no contact points.
    fn on_collision_exit(&mut self, _ctx: &mut DispatchContext<'_>, _collision: &Collision<'_>) {}
}

/// What a listener may see and do during a callback.
pub struct DispatchContext<'a> {
    pub(crate) colliders: &'a mut ColliderTable,
    pub(crate) this: ColliderId,
    pub(crate) frame: FrameId,
}

impl DispatchContext<'_> {
    /// The collider the listener is attached to.
    pub fn this(&self) -> ColliderId {
        self.this
    }

    /// The frame being dispatched.
    pub fn frame(&self) -> FrameId {
        self.frame
    }

    /// Whether `id` is still registered.
    pub fn is_valid(&self, id: ColliderId) -> bool {
        self.colliders.contains(id)
    }

    /// Look up a collider.
    pub fn collider(&self, id: ColliderId) -> Option<&Collider> {
        self.colliders.get(id)
    }

    /// Look up a collider mutably, e.g. to toggle its callbacks.
    pub fn collider_mut(&mut self, id: ColliderId) -> Option<&mut Collider> {
        self.colliders.get_mut(id)
    }

    /// Destroy a collider. Remaining callbacks for it this frame are
    /// skipped; on the next step its open pairs exit, heard only by the
    /// partner.
    pub fn destroy(&mut self, id: ColliderId) -> bool {
        self.colliders.destroy(id)
    }
}

/// A physical pair as seen from one side.
#[derive(Clone, Copy, Debug)]
pub struct Collision<'a> {
    this: ColliderId,
    other: ColliderId,
    info: &'a CollisionInfo,
    pool: &'a ContactPool,
}

impl<'a> Collision<'a> {
    pub(crate) fn new(this: ColliderId, info: &'a CollisionInfo, pool: &'a ContactPool) -> Self {
        Self {
            this,
            other: info.other(this),
            info,
            pool,
        }
    }

    /// The receiving collider.
    pub fn this(&self) -> ColliderId {
        self.this
    }

    /// The partner collider.
    pub fn other(&self) -> ColliderId {
        self.other
    }

    /// Whether the pair's current streak is a trigger overlap. Always
    /// `false` for collision callbacks.
    pub fn is_trigger(&self) -> bool {
        self.info.is_trigger()
    }

    /// The underlying pair record.
    pub fn info(&self) -> &'a CollisionInfo {
        self.info
    }

    /// Number of contact points recorded this frame.
    pub fn contact_count(&self) -> usize {
        self.info.contact_handles().len()
    }

    /// Contact points recorded this frame, in manifold order.
    ///
    /// Positions are in the narrow phase's a/b order, which need not match
    /// `this`/`other`.
    pub fn contacts(&self) -> impl Iterator<Item = &'a Contact> + 'a {
        let (info, pool) = (self.info, self.pool);
        info.contact_handles()
            .iter()
            .filter_map(move |&h| pool.get(h))
    }
}
