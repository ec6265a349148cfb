//! Core types and traits for the Impact contact pipeline.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the transform arena and the contact tracker:
//! strongly-typed ids, a minimal 3-vector, the contact-point and manifold
//! types reported by an external narrow phase, and the step error type.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod manifold;
pub mod math;

pub use error::StepError;
pub use id::{ColliderId, FrameId, UnitId};
pub use manifold::{ContactManifold, ContactPoint, Manifold};
pub use math::Vec3;
