//! Dispatch pass: classify touched pairs and deliver callbacks.
//!
//! Every Enter and Stay of the frame is delivered before any Exit. Within
//! a pair the lower collider hears first. Validity is re-checked before
//! each listener call because callbacks may destroy colliders.

use impact_core::{ColliderId, FrameId};

use crate::collider::ColliderTable;
use crate::event::{EventCategory, Phase};
use crate::info::{CollisionInfo, RecordId};
use crate::listener::{Collision, ContactListener, DispatchContext};
use crate::metrics::StepMetrics;
use crate::pool::ContactPool;
use crate::registry::CollisionRegistry;

pub(crate) fn dispatch_events(
    frame: FrameId,
    colliders: &mut ColliderTable,
    registry: &mut CollisionRegistry,
    pool: &ContactPool,
    metrics: &mut StepMetrics,
) {
    for &id in registry.current() {
        let info = registry.get(id);
        let phase = if info.continues_into(frame) {
            Phase::Stay
        } else {
            Phase::Enter
        };
        metrics.count_pair(category_of(info), phase);
        notify_pair(frame, colliders, info, pool, phase, metrics);
    }

    let previous = registry.take_previous();
    for &id in &previous {
        if registry.get(id).current_frame() == Some(frame) {
            continue;
        }
        exit_pair(frame, colliders, registry, pool, id, metrics);
    }
    registry.restore_previous(previous);
}

fn exit_pair(
    frame: FrameId,
    colliders: &mut ColliderTable,
    registry: &mut CollisionRegistry,
    pool: &ContactPool,
    id: RecordId,
    metrics: &mut StepMetrics,
) {
    debug_assert!(
        registry
            .get(id)
            .current_frame()
            .is_some_and(|last| frame.follows(last)),
        "stale collision record in previous-frame list"
    );
    // Last frame's contact handles point into a pool that has been reset.
    registry.get_mut(id).clear_contacts();
    let info = registry.get(id);
    metrics.count_pair(category_of(info), Phase::Exit);
    notify_pair(frame, colliders, info, pool, Phase::Exit, metrics);
    registry.release(id);
}

fn category_of(info: &CollisionInfo) -> EventCategory {
    if info.is_trigger() {
        EventCategory::Trigger
    } else {
        EventCategory::Collision
    }
}

fn notify_pair(
    frame: FrameId,
    colliders: &mut ColliderTable,
    info: &CollisionInfo,
    pool: &ContactPool,
    phase: Phase,
    metrics: &mut StepMetrics,
) {
    let category = category_of(info);
    for this in [info.collider_a(), info.collider_b()] {
        let other = info.other(this);
        metrics.callbacks += notify_side(frame, colliders, this, category, |listener, ctx| {
            match category {
                EventCategory::Trigger => match phase {
                    Phase::Enter => listener.on_trigger_enter(ctx, other),
                    Phase::Stay => listener.on_trigger_stay(ctx, other),
                    Phase::Exit => listener.on_trigger_exit(ctx, other),
                },
                EventCategory::Collision => {
                    let collision = Collision::new(this, info, pool);
                    match phase {
                        Phase::Enter => listener.on_collision_enter(ctx, &collision),
                        Phase::Stay => listener.on_collision_stay(ctx, &collision),
                        Phase::Exit => listener.on_collision_exit(ctx, &collision),
                    }
                }
            }
        });
    }
}

/// Call `f` on every interested listener of `this`. Returns the number of
/// calls made.
///
/// The listener list is moved out for the duration so callbacks can
/// mutate the collider table. Listeners attached during dispatch are kept
/// and run from the next event on.
fn notify_side<F>(
    frame: FrameId,
    colliders: &mut ColliderTable,
    this: ColliderId,
    category: EventCategory,
    mut f: F,
) -> u64
where
    F: FnMut(&mut dyn ContactListener, &mut DispatchContext<'_>),
{
    let Some(collider) = colliders.get_mut(this) else {
        return 0;
    };
    if !collider.wants(category) || collider.listeners.is_empty() {
        return 0;
    }
    let mut listeners = std::mem::take(&mut collider.listeners);
    let mut calls = 0;
    for listener in listeners.iter_mut() {
        match colliders.get(this) {
            Some(c) if c.wants(category) => {}
            _ => break,
        }
        if !listener.interest().includes(category) {
            continue;
        }
        let mut ctx = DispatchContext {
            colliders: &mut *colliders,
            this,
            frame,
        };
        f(listener.as_mut(), &mut ctx);
        calls += 1;
    }
    if let Some(collider) = colliders.get_mut(this) {
        listeners.append(&mut collider.listeners);
        collider.listeners = listeners;
    }
    calls
}
