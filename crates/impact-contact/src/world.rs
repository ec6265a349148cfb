//! The contact world: owns colliders, records, and the step loop.

use std::time::Instant;

use impact_core::{ColliderId, FrameId, Manifold, StepError};
use tracing::{instrument, trace};

use crate::collider::{Collider, ColliderDesc, ColliderTable};
use crate::config::ContactConfig;
use crate::dispatch::dispatch_events;
use crate::error::ContactError;
use crate::info::CollisionInfo;
use crate::listener::ContactListener;
use crate::metrics::StepMetrics;
use crate::pool::ContactPool;
use crate::registry::CollisionRegistry;
use crate::update::{check_manifolds, update_collisions};

// ── ContactWorld ─────────────────────────────────────────────────

/// Single-threaded contact tracker.
///
/// Call [`step`](Self::step) once per simulation step with that step's
/// manifolds. Each call runs the update pass, then dispatches every
/// Enter/Stay, then every Exit.
pub struct ContactWorld {
    config: ContactConfig,
    colliders: ColliderTable,
    registry: CollisionRegistry,
    contacts: ContactPool,
    frame: FrameId,
    last_metrics: StepMetrics,
}

impl ContactWorld {
    /// Build an empty world.
    pub fn new(config: ContactConfig) -> Result<Self, ContactError> {
        config.validate()?;
        Ok(Self {
            registry: CollisionRegistry::with_capacity(config.record_capacity),
            contacts: ContactPool::with_capacity(config.contact_capacity),
            colliders: ColliderTable::new(),
            frame: FrameId::default(),
            last_metrics: StepMetrics::default(),
            config,
        })
    }

    /// Register a collider. Ids are never reused.
    pub fn register(&mut self, desc: ColliderDesc) -> Result<ColliderId, ContactError> {
        self.colliders.register(desc)
    }

    /// Destroy a collider. Its open pairs produce no further callbacks on
    /// its side; the partner still hears the Exit.
    pub fn destroy(&mut self, id: ColliderId) -> bool {
        self.colliders.destroy(id)
    }

    /// Attach a listener to a collider.
    pub fn add_listener(
        &mut self,
        id: ColliderId,
        listener: Box<dyn ContactListener>,
    ) -> Result<(), ContactError> {
        self.colliders.add_listener(id, listener)
    }

    /// Whether `id` is registered.
    pub fn is_valid(&self, id: ColliderId) -> bool {
        self.colliders.contains(id)
    }

    /// Look up a collider.
    pub fn collider(&self, id: ColliderId) -> Option<&Collider> {
        self.colliders.get(id)
    }

    /// Look up a collider mutably.
    pub fn collider_mut(&mut self, id: ColliderId) -> Option<&mut Collider> {
        self.colliders.get_mut(id)
    }

    /// All registered colliders.
    pub fn colliders(&self) -> &ColliderTable {
        &self.colliders
    }

    /// The record for a pair, in either order, if the pair is tracked.
    pub fn collision(&self, a: ColliderId, b: ColliderId) -> Option<&CollisionInfo> {
        let (lower, higher) = if a < b { (a, b) } else { (b, a) };
        self.registry
            .find(lower, higher)
            .map(|id| self.registry.get(id))
    }

    /// The collision registry.
    pub fn registry(&self) -> &CollisionRegistry {
        &self.registry
    }

    /// This step's contact records.
    pub fn contacts(&self) -> &ContactPool {
        &self.contacts
    }

    /// The last frame stepped, or frame 0 before the first step.
    pub fn frame(&self) -> FrameId {
        self.frame
    }

    /// The configuration this world was built with.
    pub fn config(&self) -> &ContactConfig {
        &self.config
    }

    /// Metrics from the most recent successful step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// Advance one frame.
    ///
    /// Fails only on frame-counter overflow, or on an unregistered
    /// collider when `strict_manifolds` is set. A failed step changes
    /// nothing: the frame counter, records and pending exits are left as
    /// they were, and the next successful step picks up from there.
    #[instrument(skip_all, fields(last_frame = self.frame.0, manifolds = manifolds.len()))]
    pub fn step<M: Manifold>(&mut self, manifolds: &[M]) -> Result<StepMetrics, StepError> {
        let step_start = Instant::now();
        let frame = self
            .frame
            .next()
            .ok_or(StepError::FrameOverflow { last: self.frame })?;
        if self.config.strict_manifolds {
            check_manifolds(manifolds, &self.colliders)?;
        }
        self.frame = frame;

        let mut metrics = StepMetrics {
            frame,
            ..StepMetrics::default()
        };

        // ── update pass ──────────────────────────────────────────
        let update_start = Instant::now();
        self.registry.begin_frame();
        self.contacts.reset();
        update_collisions(
            frame,
            manifolds,
            &self.colliders,
            &mut self.registry,
            &mut self.contacts,
            &self.config,
            &mut metrics,
        );
        debug_assert_eq!(self.contacts.used(), metrics.contacts_recorded as usize);
        metrics.update_us = update_start.elapsed().as_micros() as u64;

        // ── dispatch pass ────────────────────────────────────────
        let dispatch_start = Instant::now();
        dispatch_events(
            frame,
            &mut self.colliders,
            &mut self.registry,
            &self.contacts,
            &mut metrics,
        );
        if self.colliders.take_destroyed() {
            let colliders = &self.colliders;
            self.registry.prune(|id| colliders.contains(id));
        }
        metrics.dispatch_us = dispatch_start.elapsed().as_micros() as u64;

        metrics.live_records = self.registry.live();
        metrics.pooled_records = self.registry.pooled();
        metrics.contact_capacity = self.contacts.capacity();
        metrics.total_us = step_start.elapsed().as_micros() as u64;

        trace!(
            enters = metrics.enters(),
            stays = metrics.stays(),
            exits = metrics.exits(),
            contacts = metrics.contacts_recorded,
            live_records = metrics.live_records,
            "contact step"
        );
        self.last_metrics = metrics.clone();
        Ok(metrics)
    }
}
