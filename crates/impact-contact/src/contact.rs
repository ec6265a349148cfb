//! Scene-space contact records.

use impact_core::{ColliderId, ContactPoint, Vec3};

use crate::config::Handedness;

/// Index of a [`Contact`] inside the step's [`ContactPool`](crate::ContactPool).
///
/// Valid only until the next step resets the pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContactHandle(pub(crate) u32);

impl ContactHandle {
    /// Position in the pool.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One contact point, converted to scene coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    /// First collider of the manifold this point came from.
    pub collider_a: ColliderId,
    /// Second collider of the manifold.
    pub collider_b: ColliderId,
    /// Signed separation; non-positive while penetrating.
    pub distance: f32,
    /// Contact normal, pointing from `collider_b` towards `collider_a`.
    pub normal: Vec3,
    /// Contact position on `collider_a`.
    pub position_a: Vec3,
    /// Contact position on `collider_b`.
    pub position_b: Vec3,
}

impl Contact {
    /// A cleared record.
    pub const EMPTY: Self = Self {
        collider_a: ColliderId::NONE,
        collider_b: ColliderId::NONE,
        distance: 0.0,
        normal: Vec3::ZERO,
        position_a: Vec3::ZERO,
        position_b: Vec3::ZERO,
    };

    /// Clear back to [`Contact::EMPTY`].
    pub fn reset(&mut self) {
        *self = Self::EMPTY;
    }

    /// Copy a narrow-phase point into this record.
    pub(crate) fn fill(
        &mut self,
        collider_a: ColliderId,
        collider_b: ColliderId,
        point: &ContactPoint,
        handedness: Handedness,
    ) {
        let convert = |v: Vec3| match handedness {
            Handedness::MirrorX => v.mirror_x(),
            Handedness::Native => v,
        };
        *self = Self {
            collider_a,
            collider_b,
            distance: point.distance,
            normal: convert(point.normal_on_b),
            position_a: convert(point.position_on_a),
            position_b: convert(point.position_on_b),
        };
    }
}

impl Default for Contact {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point() -> ContactPoint {
        ContactPoint {
            distance: -0.01,
            normal_on_b: Vec3::new(1.0, 0.0, 0.0),
            position_on_a: Vec3::new(2.0, 1.0, 0.0),
            position_on_b: Vec3::new(-3.0, 1.0, 4.0),
        }
    }

    #[test]
    fn mirror_x_negates_x_components() {
        let mut c = Contact::EMPTY;
        c.fill(ColliderId(1), ColliderId(2), &point(), Handedness::MirrorX);
        assert_eq!(c.normal, Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(c.position_a, Vec3::new(-2.0, 1.0, 0.0));
        assert_eq!(c.position_b, Vec3::new(3.0, 1.0, 4.0));
        assert_eq!(c.distance, -0.01);
        assert_eq!(c.collider_a, ColliderId(1));
    }

    #[test]
    fn native_copies_verbatim() {
        let mut c = Contact::EMPTY;
        c.fill(ColliderId(1), ColliderId(2), &point(), Handedness::Native);
        assert_eq!(c.normal, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(c.position_b, Vec3::new(-3.0, 1.0, 4.0));
    }

    #[test]
    fn reset_clears_everything() {
        let mut c = Contact::EMPTY;
        c.fill(ColliderId(1), ColliderId(2), &point(), Handedness::Native);
        c.reset();
        assert_eq!(c, Contact::EMPTY);
        assert!(c.collider_a.is_none());
    }
}
