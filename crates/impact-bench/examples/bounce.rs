//! A ball bouncing on a floor through a trigger zone.
//!
//! Demonstrates: register colliders → attach listeners → feed manifolds
//! each step → read per-step metrics. Set `RUST_LOG=impact_contact=trace`
//! to see the per-step trace events.

use impact_arena::{ArenaConfig, TransformArena};
use impact_contact::{
    ColliderDesc, Collision, ContactConfig, ContactListener, ContactWorld, DispatchContext,
};
use impact_core::{ColliderId, ContactManifold};
use impact_test_utils::fixtures::{touching, ManifoldBuilder};
use tracing::info;
use tracing_subscriber::EnvFilter;

struct Announcer {
    name: &'static str,
}

impl ContactListener for Announcer {
    fn on_trigger_enter(&mut self, ctx: &mut DispatchContext<'_>, other: ColliderId) {
        info!(frame = %ctx.frame(), "{} entered trigger with {other}", self.name);
    }

    fn on_trigger_exit(&mut self, ctx: &mut DispatchContext<'_>, other: ColliderId) {
        info!(frame = %ctx.frame(), "{} left trigger with {other}", self.name);
    }

    fn on_collision_enter(&mut self, ctx: &mut DispatchContext<'_>, collision: &Collision<'_>) {
        for contact in collision.contacts() {
            info!(
                frame = %ctx.frame(),
                "{} hit {} at depth {:.3}, normal {}",
                self.name,
                collision.other(),
                contact.distance,
                contact.normal
            );
        }
    }

    fn on_collision_exit(&mut self, ctx: &mut DispatchContext<'_>, collision: &Collision<'_>) {
        info!(frame = %ctx.frame(), "{} bounced off {}", self.name, collision.other());
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut world = ContactWorld::new(ContactConfig::default()).unwrap();
    let ball = world.register(ColliderDesc::solid()).unwrap();
    let floor = world.register(ColliderDesc::silent()).unwrap();
    let zone = world.register(ColliderDesc::trigger()).unwrap();
    world
        .add_listener(ball, Box::new(Announcer { name: "ball" }))
        .unwrap();
    world
        .add_listener(zone, Box::new(Announcer { name: "zone" }))
        .unwrap();

    // One transform slot per collider.
    let mut transforms = TransformArena::new(ArenaConfig::default()).unwrap();
    let ball_slot = transforms.acquire().unwrap();
    let _floor_slot = transforms.acquire().unwrap();
    let _zone_slot = transforms.acquire().unwrap();

    let mut height = 2.0f32;
    let mut velocity = 0.0f32;
    for _ in 0..120 {
        velocity -= 9.81 / 60.0;
        height += velocity / 60.0;

        let mut manifolds: Vec<ContactManifold> = Vec::new();
        if height <= 0.5 {
            manifolds.push(
                ManifoldBuilder::new(ball, floor)
                    .point(height - 0.5)
                    .point(height - 0.5)
                    .build(),
            );
            velocity = velocity.abs() * 0.8;
        }
        if (0.8..1.2).contains(&height) {
            manifolds.push(touching(ball, zone));
        }

        transforms.node_mut(&ball_slot).set_position([0.0, height, 0.0]);
        let metrics = world.step(&manifolds).unwrap();
        if metrics.enters() + metrics.exits() > 0 {
            info!(
                frame = %metrics.frame,
                live = metrics.live_records,
                contacts = metrics.contacts_recorded,
                "step"
            );
        }
    }

    let stats = transforms.stats();
    info!(
        units = stats.units,
        live = stats.live,
        bytes = stats.memory_bytes,
        "transform arena"
    );
}
