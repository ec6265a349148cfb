//! Manifold fixtures.
//!
//! - [`ManifoldBuilder`] assembles a [`ContactManifold`] point by point.
//! - [`touching`] and [`separated`] cover the common one-point cases.

use impact_core::{ColliderId, ContactManifold, ContactPoint, Vec3};

/// Penetration depth used by the one-point helpers.
pub const DEPTH: f32 = -0.01;

pub struct ManifoldBuilder {
    manifold: ContactManifold,
}

impl ManifoldBuilder {
    pub fn new(a: ColliderId, b: ColliderId) -> Self {
        Self {
            manifold: ContactManifold::new(a, b),
        }
    }

    /// Add a point with `distance` and an up-facing normal.
    pub fn point(mut self, distance: f32) -> Self {
        self.manifold.push(ContactPoint {
            distance,
            normal_on_b: Vec3::new(0.0, 1.0, 0.0),
            position_on_a: Vec3::ZERO,
            position_on_b: Vec3::ZERO,
        });
        self
    }

    /// Add a fully specified point.
    pub fn point_at(
        mut self,
        distance: f32,
        normal_on_b: Vec3,
        position_on_a: Vec3,
        position_on_b: Vec3,
    ) -> Self {
        self.manifold.push(ContactPoint {
            distance,
            normal_on_b,
            position_on_a,
            position_on_b,
        });
        self
    }

    pub fn build(self) -> ContactManifold {
        self.manifold
    }
}

/// One penetrating point between `a` and `b`.
pub fn touching(a: ColliderId, b: ColliderId) -> ContactManifold {
    ManifoldBuilder::new(a, b).point(DEPTH).build()
}

/// One separated point between `a` and `b`: reported, but not a touch.
pub fn separated(a: ColliderId, b: ColliderId) -> ContactManifold {
    ManifoldBuilder::new(a, b).point(0.05).build()
}
