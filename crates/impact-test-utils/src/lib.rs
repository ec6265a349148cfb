//! Test utilities for Impact development.
//!
//! [`RecordingListener`] appends every callback it receives to a shared
//! [`EventLog`], so a test can attach listeners to several colliders and
//! then assert on the interleaved event order. Manifold fixtures live in
//! [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::cell::RefCell;
use std::rc::Rc;

use impact_contact::{Collision, ContactListener, DispatchContext, Interest};
use impact_core::{ColliderId, FrameId};

/// One recorded callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    TriggerEnter,
    TriggerStay,
    TriggerExit,
    CollisionEnter,
    CollisionStay,
    CollisionExit,
}

impl EventKind {
    pub fn is_trigger(self) -> bool {
        matches!(
            self,
            Self::TriggerEnter | Self::TriggerStay | Self::TriggerExit
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Event {
    pub frame: FrameId,
    pub this: ColliderId,
    pub other: ColliderId,
    pub kind: EventKind,
    /// Contact points carried by a collision callback; 0 for triggers.
    pub contacts: usize,
}

/// Shared, append-only event list.
#[derive(Clone, Debug, Default)]
pub struct EventLog(Rc<RefCell<Vec<Event>>>);

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    /// Snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&self) -> Vec<Event> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    /// `(this, other, kind)` triples, dropping frame and contact count.
    pub fn drain_kinds(&self) -> Vec<(ColliderId, ColliderId, EventKind)> {
        self.drain()
            .into_iter()
            .map(|e| (e.this, e.other, e.kind))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

/// Listener that records every callback into an [`EventLog`].
pub struct RecordingListener {
    log: EventLog,
    interest: Interest,
}

impl RecordingListener {
    pub fn new(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            interest: Interest::ALL,
        }
    }

    pub fn with_interest(log: &EventLog, interest: Interest) -> Self {
        Self {
            log: log.clone(),
            interest,
        }
    }

    pub fn boxed(log: &EventLog) -> Box<dyn ContactListener> {
        Box::new(Self::new(log))
    }

    fn record(&self, ctx: &DispatchContext<'_>, other: ColliderId, kind: EventKind, contacts: usize) {
        self.log.push(Event {
            frame: ctx.frame(),
            this: ctx.this(),
            other,
            kind,
            contacts,
        });
    }
}

impl ContactListener for RecordingListener {
    fn interest(&self) -> Interest {
        self.interest
    }

    fn on_trigger_enter(&mut self, ctx: &mut DispatchContext<'_>, other: ColliderId) {
        self.record(ctx, other, EventKind::TriggerEnter, 0);
    }

    fn on_trigger_stay(&mut self, ctx: &mut DispatchContext<'_>, other: ColliderId) {
        self.record(ctx, other, EventKind::TriggerStay, 0);
    }

    fn on_trigger_exit(&mut self, ctx: &mut DispatchContext<'_>, other: ColliderId) {
        self.record(ctx, other, EventKind::TriggerExit, 0);
    }

    fn on_collision_enter(&mut self, ctx: &mut DispatchContext<'_>, collision: &Collision<'_>) {
        self.record(
            ctx,
            collision.other(),
            EventKind::CollisionEnter,
            collision.contact_count(),
        );
    }

    fn on_collision_stay(&mut self, ctx: &mut DispatchContext<'_>, collision: &Collision<'_>) {
        self.record(
            ctx,
            collision.other(),
            EventKind::CollisionStay,
            collision.contact_count(),
        );
    }

    fn on_collision_exit(&mut self, ctx: &mut DispatchContext<'_>, collision: &Collision<'_>) {
        self.record(
            ctx,
            collision.other(),
            EventKind::CollisionExit,
            collision.contact_count(),
        );
    }
}

/// Destroys a collider the first time its owner hears an Enter.
pub struct DestroyOnEnter {
    pub target: ColliderId,
}

impl ContactListener for DestroyOnEnter {
    fn on_trigger_enter(&mut self, ctx: &mut DispatchContext<'_>, _other: ColliderId) {
        ctx.destroy(self.target);
    }

    fn on_collision_enter(&mut self, ctx: &mut DispatchContext<'_>, _collision: &Collision<'_>) {
        ctx.destroy(self.target);
    }
}
