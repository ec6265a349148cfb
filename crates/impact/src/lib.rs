//! Impact: contact lifecycle tracking and pooled transform storage.
//!
//! This is the facade crate that re-exports the public API of the Impact
//! sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use impact::prelude::*;
//! use impact::types::ContactPoint;
//!
//! struct Bell;
//! impl ContactListener for Bell {
//!     fn on_collision_enter(&mut self, ctx: &mut DispatchContext<'_>, c: &Collision<'_>) {
//!         assert_eq!(ctx.this(), c.this());
//!     }
//! }
//!
//! let mut world = ContactWorld::new(ContactConfig::default()).unwrap();
//! let ball = world.register(ColliderDesc::solid()).unwrap();
//! let floor = world.register(ColliderDesc::solid()).unwrap();
//! world.add_listener(ball, Box::new(Bell)).unwrap();
//!
//! let mut manifold = ContactManifold::new(ball, floor);
//! manifold.push(ContactPoint { distance: -0.01, ..Default::default() });
//! let metrics = world.step(&[manifold]).unwrap();
//! assert_eq!(metrics.collision_enters, 1);
//!
//! let mut arena = TransformArena::new(ArenaConfig::default()).unwrap();
//! let slot = arena.acquire().unwrap();
//! arena.node_mut(&slot).set_position([0.0, 1.0, 0.0]);
//! arena.release(slot);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `impact-core` | Ids, vectors, manifolds, step errors |
//! | [`arena`] | `impact-arena` | Pooled transform slots |
//! | [`contact`] | `impact-contact` | Colliders, collision registry, listeners |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core ids, math, and the narrow-phase manifold interface (`impact-core`).
pub use impact_core as types;

/// Pooled transform storage (`impact-arena`).
///
/// [`arena::TransformArena`] hands out [`arena::SlotView`]s into
/// fixed-size units that grow on demand and never shrink.
pub use impact_arena as arena;

/// Contact lifecycle tracking (`impact-contact`).
///
/// [`contact::ContactWorld`] folds each step's manifolds into pooled
/// [`contact::CollisionInfo`] records and dispatches Enter/Stay/Exit
/// callbacks to [`contact::ContactListener`]s.
pub use impact_contact as contact;

/// Common imports.
///
/// ```rust
/// use impact::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use impact_core::{ColliderId, ContactManifold, FrameId, Manifold, StepError, Vec3};

    // Arena
    pub use impact_arena::{ArenaConfig, ArenaError, DirtyFlags, SlotView, TransformArena};

    // Contact
    pub use impact_contact::{
        ColliderDesc, Collision, CollisionFilter, ContactConfig, ContactError, ContactListener,
        ContactWorld, DispatchContext, Handedness, Interest, StepMetrics,
    };
}
