//! Engine - Element handle registry.
//!
//! The engine manages the element-handle substrate the lazy-loading core is
//! built on. Components are not objects; they are indices allocated from a
//! registry:
//!
//! - Registry: index allocation, ID mapping, parent context
//! - Destroy callbacks: per-index cleanup hooks for other modules
//!
//! The observer registry keys its tracked elements by these indices, and the
//! placeholder wrapper allocates one index per mounted instance.

mod registry;

pub use registry::*;
