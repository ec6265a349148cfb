//! Pooled transform storage for movable scene nodes.
//!
//! Every movable node owns one fixed-stride slot holding its dirty flags,
//! TRS tuple, local matrix and world matrix. Slots are carved out of large
//! contiguous units so that walking live transforms stays cache friendly,
//! and allocation and release are O(1) with no fragmentation.
//!
//! # Architecture
//!
//! ```text
//! TransformArena (pool)
//! ├── Unit × N (appended on demand, never shrunk)
//! │   ├── TransformNode × nodes_per_unit (contiguous, 45 words each)
//! │   ├── free list   head → [free] → [free] → …   (singly linked)
//! │   └── using list  … ⇄ [live] ⇄ [live] ← tail   (doubly linked)
//! └── find order (unit most recently found with space goes first)
//! ```
//!
//! Callers receive a [`SlotView`]: a unit id plus slot index. The view is a
//! back-reference, never an owner; it must be handed back through
//! [`TransformArena::release`] exactly once.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod handle;
pub mod node;
pub mod pool;
pub mod unit;

pub use config::ArenaConfig;
pub use error::ArenaError;
pub use handle::SlotView;
pub use node::{DirtyFlags, TransformNode, NODE_STRIDE_WORDS};
pub use pool::{ArenaStats, TransformArena};
pub use unit::{Unit, UnitStats};
