//! Narrow-phase interface types.
//!
//! The collision engine that produces manifolds is external. Each step it
//! reports a sequence of overlapping body pairs, and for each pair a list
//! of contact points. [`Manifold`] is the read-only view the contact
//! tracker consumes; [`ContactManifold`] is an owned implementation used
//! by adapters and tests.

use smallvec::SmallVec;

use crate::id::ColliderId;
use crate::math::Vec3;

/// A single contact point as reported by the narrow phase.
///
/// Coordinates are in the narrow phase's own handedness; the contact
/// tracker converts them when copying into its contact records.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContactPoint {
    /// Signed separation between the surfaces. `<= 0` means overlapping.
    pub distance: f32,
    /// Contact normal in world space, on body B.
    pub normal_on_b: Vec3,
    /// World-space contact position on body A.
    pub position_on_a: Vec3,
    /// World-space contact position on body B.
    pub position_on_b: Vec3,
}

impl ContactPoint {
    /// Whether this point describes an actual overlap.
    ///
    /// Positive distances are speculative points and never count as contacts.
    pub fn is_penetrating(&self) -> bool {
        self.distance <= 0.0
    }
}

/// Read-only view of one narrow-phase manifold.
///
/// `body_a` / `body_b` are the opaque user indices the collider table
/// stamped on the engine's bodies at registration time.
pub trait Manifold {
    /// User index of the first body.
    fn body_a(&self) -> ColliderId;

    /// User index of the second body.
    fn body_b(&self) -> ColliderId;

    /// Number of contact points in this manifold.
    fn contact_count(&self) -> usize;

    /// The `index`-th contact point.
    ///
    /// # Panics
    ///
    /// May panic if `index >= contact_count()`.
    fn contact(&self, index: usize) -> ContactPoint;
}

/// An owned manifold: a body pair plus up to four inline contact points.
///
/// Four points covers the persistent manifolds of box-style narrow phases
/// without spilling to the heap.
#[derive(Clone, Debug, PartialEq)]
pub struct ContactManifold {
    /// First body.
    pub body_a: ColliderId,
    /// Second body.
    pub body_b: ColliderId,
    /// Contact points, in narrow-phase order.
    pub points: SmallVec<[ContactPoint; 4]>,
}

impl ContactManifold {
    /// An empty manifold for the given pair.
    pub fn new(body_a: ColliderId, body_b: ColliderId) -> Self {
        Self {
            body_a,
            body_b,
            points: SmallVec::new(),
        }
    }

    /// Append a contact point.
    pub fn push(&mut self, point: ContactPoint) {
        self.points.push(point);
    }
}

impl Manifold for ContactManifold {
    fn body_a(&self) -> ColliderId {
        self.body_a
    }

    fn body_b(&self) -> ColliderId {
        self.body_b
    }

    fn contact_count(&self) -> usize {
        self.points.len()
    }

    fn contact(&self, index: usize) -> ContactPoint {
        self.points[index]
    }
}

impl<M: Manifold + ?Sized> Manifold for &M {
    fn body_a(&self) -> ColliderId {
        (**self).body_a()
    }

    fn body_b(&self) -> ColliderId {
        (**self).body_b()
    }

    fn contact_count(&self) -> usize {
        (**self).contact_count()
    }

    fn contact(&self, index: usize) -> ContactPoint {
        (**self).contact(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn penetration_boundary_is_inclusive() {
        let touching = ContactPoint {
            distance: 0.0,
            ..ContactPoint::default()
        };
        let apart = ContactPoint {
            distance: 0.001,
            ..ContactPoint::default()
        };
        assert!(touching.is_penetrating());
        assert!(!apart.is_penetrating());
    }

    #[test]
    fn owned_manifold_exposes_points_in_order() {
        let mut m = ContactManifold::new(ColliderId(3), ColliderId(7));
        m.push(ContactPoint {
            distance: -0.5,
            ..ContactPoint::default()
        });
        m.push(ContactPoint {
            distance: 0.25,
            ..ContactPoint::default()
        });
        assert_eq!(m.body_a(), ColliderId(3));
        assert_eq!(m.body_b(), ColliderId(7));
        assert_eq!(m.contact_count(), 2);
        assert_eq!(m.contact(0).distance, -0.5);
        assert_eq!(m.contact(1).distance, 0.25);
        assert!(!m.points.spilled());
    }

    #[test]
    fn reference_forwards_to_manifold() {
        let m = ContactManifold::new(ColliderId(1), ColliderId(2));
        let r = &m;
        assert_eq!(Manifold::body_b(&r), ColliderId(2));
        assert_eq!(Manifold::contact_count(&r), 0);
    }
}
