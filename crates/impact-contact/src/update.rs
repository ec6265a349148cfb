//! Update pass: fold the frame's manifolds into the registry.

use impact_core::{FrameId, Manifold, StepError};
use tracing::warn;

use crate::collider::ColliderTable;
use crate::config::ContactConfig;
use crate::metrics::StepMetrics;
use crate::pool::ContactPool;
use crate::registry::CollisionRegistry;

/// Fail on the first manifold naming an unregistered collider.
///
/// Runs before any state is touched, so a rejected step leaves the world
/// exactly as it was.
pub(crate) fn check_manifolds<M: Manifold>(
    manifolds: &[M],
    colliders: &ColliderTable,
) -> Result<(), StepError> {
    for manifold in manifolds {
        for id in [manifold.body_a(), manifold.body_b()] {
            if !colliders.contains(id) {
                return Err(StepError::UnknownCollider { id });
            }
        }
    }
    Ok(())
}

/// Stamp every touched pair with `frame` and record physical contacts.
///
/// Expects [`CollisionRegistry::begin_frame`] and [`ContactPool::reset`]
/// to have run already. Manifolds naming an unregistered collider are
/// skipped; strict worlds reject them earlier through [`check_manifolds`].
pub(crate) fn update_collisions<M: Manifold>(
    frame: FrameId,
    manifolds: &[M],
    colliders: &ColliderTable,
    registry: &mut CollisionRegistry,
    pool: &mut ContactPool,
    config: &ContactConfig,
    metrics: &mut StepMetrics,
) {
    for manifold in manifolds {
        metrics.manifolds += 1;
        let (a, b) = (manifold.body_a(), manifold.body_b());

        let (ca, cb) = match (colliders.get(a), colliders.get(b)) {
            (Some(ca), Some(cb)) => (ca, cb),
            (ca, _) => {
                let id = if ca.is_none() { a } else { b };
                warn!(collider = %id, %frame, "skipping manifold for unregistered collider");
                metrics.manifolds_skipped += 1;
                continue;
            }
        };
        if a == b {
            warn!(collider = %a, %frame, "skipping self-pair manifold");
            metrics.manifolds_skipped += 1;
            continue;
        }
        if !ca.filter().allows(cb.filter()) {
            metrics.manifolds_filtered += 1;
            continue;
        }

        let (lower, higher) = if a < b { (a, b) } else { (b, a) };

        if ca.is_trigger() || cb.is_trigger() {
            let penetrating = (0..manifold.contact_count())
                .any(|i| manifold.contact(i).is_penetrating());
            if penetrating {
                let id = registry.find_or_create(lower, higher);
                registry.touch(id, frame, true);
            }
        } else if ca.wants_collision_callbacks() || cb.wants_collision_callbacks() {
            let mut record = None;
            for i in 0..manifold.contact_count() {
                let point = manifold.contact(i);
                if !point.is_penetrating() {
                    continue;
                }
                let id = match record {
                    Some(id) => id,
                    None => {
                        let id = registry.find_or_create(lower, higher);
                        registry.touch(id, frame, false);
                        record = Some(id);
                        id
                    }
                };
                let (handle, contact) = pool.next();
                contact.fill(a, b, &point, config.handedness);
                registry.get_mut(id).push_contact(handle);
                metrics.contacts_recorded += 1;
            }
        }
    }
}
