//! Benchmark scenes for Impact.
//!
//! - [`ContactScene`]: a world of solid bodies and trigger volumes plus a
//!   deterministic per-frame manifold stream.
//! - [`SceneProfile`]: sizing knobs for [`ContactScene`].

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use impact_contact::{ColliderDesc, ContactConfig, ContactError, ContactWorld};
use impact_core::{ColliderId, ContactManifold, ContactPoint, Vec3};
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Sizing for a generated contact scene.
#[derive(Clone, Copy, Debug)]
pub struct SceneProfile {
    /// Solid bodies.
    pub bodies: u32,
    /// Trigger volumes.
    pub triggers: u32,
    /// Manifolds reported per frame.
    pub manifolds_per_frame: u32,
    /// Contact points per manifold.
    pub points_per_manifold: u32,
    /// Percentage of manifolds carried over from the previous frame.
    pub persistence_pct: u32,
}

impl SceneProfile {
    /// 256 bodies, 16 triggers, 128 manifolds a frame, mostly persistent.
    pub fn reference() -> Self {
        Self {
            bodies: 256,
            triggers: 16,
            manifolds_per_frame: 128,
            points_per_manifold: 4,
            persistence_pct: 80,
        }
    }

    /// Ten times the reference pair count.
    pub fn stress() -> Self {
        Self {
            bodies: 2048,
            triggers: 64,
            manifolds_per_frame: 1280,
            points_per_manifold: 4,
            persistence_pct: 80,
        }
    }
}

/// A populated world plus a reproducible manifold generator.
pub struct ContactScene {
    /// The world under test.
    pub world: ContactWorld,
    colliders: Vec<ColliderId>,
    pairs: Vec<(ColliderId, ColliderId)>,
    profile: SceneProfile,
    rng: ChaCha8Rng,
}

impl ContactScene {
    /// Register every collider in `profile` and seed the pair stream.
    pub fn new(profile: SceneProfile, seed: u64) -> Result<Self, ContactError> {
        let mut world = ContactWorld::new(ContactConfig {
            contact_capacity: (profile.manifolds_per_frame * profile.points_per_manifold) as usize,
            record_capacity: profile.manifolds_per_frame as usize,
            ..ContactConfig::default()
        })?;
        let mut colliders = Vec::with_capacity((profile.bodies + profile.triggers) as usize);
        for _ in 0..profile.bodies {
            colliders.push(world.register(ColliderDesc::solid())?);
        }
        for _ in 0..profile.triggers {
            colliders.push(world.register(ColliderDesc::trigger())?);
        }
        Ok(Self {
            world,
            colliders,
            pairs: Vec::new(),
            profile,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// Every registered collider.
    pub fn colliders(&self) -> &[ColliderId] {
        &self.colliders
    }

    /// Produce the next frame's manifolds.
    ///
    /// Keeps roughly `persistence_pct` of last frame's pairs and fills the
    /// rest with fresh random pairs.
    pub fn next_frame(&mut self) -> Vec<ContactManifold> {
        let keep = self.profile.persistence_pct;
        let rng = &mut self.rng;
        self.pairs.retain(|_| rng.next_u32() % 100 < keep);

        let n = self.colliders.len() as u32;
        while (self.pairs.len() as u32) < self.profile.manifolds_per_frame && n > 1 {
            let a = self.colliders[(self.rng.next_u32() % n) as usize];
            let b = self.colliders[(self.rng.next_u32() % n) as usize];
            if a != b {
                self.pairs.push((a, b));
            }
        }

        self.pairs
            .iter()
            .map(|&(a, b)| {
                let mut m = ContactManifold::new(a, b);
                for i in 0..self.profile.points_per_manifold {
                    m.push(ContactPoint {
                        distance: if i % 2 == 0 { -0.01 } else { 0.02 },
                        normal_on_b: Vec3::new(0.0, 1.0, 0.0),
                        position_on_a: Vec3::new(i as f32, 0.0, 0.0),
                        position_on_b: Vec3::new(i as f32, -0.01, 0.0),
                    });
                }
                m
            })
            .collect()
    }
}
