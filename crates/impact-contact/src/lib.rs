//! Contact lifecycle tracking for an external narrow phase.
//!
//! Once per simulation step the narrow phase reports every overlapping body
//! pair together with its contact points. [`ContactWorld::step`] turns that
//! raw stream into stable per-pair Enter/Stay/Exit events:
//!
//! ```text
//! narrow phase manifolds
//!   │
//!   ▼
//! update pass ──► CollisionRegistry (pair → CollisionInfo, pooled)
//!   │                 ▲
//!   │             ContactPool (per-step scratch contacts)
//!   ▼
//! dispatch pass ─► ContactListener callbacks on both colliders
//! ```
//!
//! The registry double-buffers the set of records touched this frame and
//! the previous one. Records in both are *Stay*, records only in the
//! current set are *Enter*, and records left over in the previous set are
//! *Exit* and go back to the pool.
//!
//! Everything here is single-threaded and synchronous. Listeners may
//! destroy colliders from inside a callback; the dispatch pass re-checks
//! validity before every call.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod collider;
pub mod config;
pub mod contact;
mod dispatch;
pub mod error;
pub mod event;
pub mod info;
pub mod listener;
pub mod metrics;
pub mod pool;
pub mod registry;
mod update;
pub mod world;

pub use collider::{Collider, ColliderDesc, ColliderTable, CollisionFilter};
pub use config::{ContactConfig, Handedness};
pub use contact::{Contact, ContactHandle};
pub use error::ContactError;
pub use event::{EventCategory, Interest, Phase};
pub use info::{CollisionInfo, RecordId};
pub use listener::{Collision, ContactListener, DispatchContext};
pub use metrics::StepMetrics;
pub use pool::ContactPool;
pub use registry::CollisionRegistry;
pub use world::ContactWorld;
