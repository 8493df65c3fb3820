//! Observer - Visibility observation capability and shared registry.
//!
//! Two halves:
//! - [`backend`]: the contract a host runtime implements (observer
//!   constructor, intersection records, options) plus installation and the
//!   availability check.
//! - [`registry`]: the process-wide registry that multiplexes one observer
//!   instance across every mounted placeholder.
//!
//! Hosts that cannot observe visibility simply install nothing; lazy
//! component factories detect the absence and degrade to immediate loading.

mod backend;
mod registry;

#[cfg(test)]
pub(crate) mod mock;

pub use backend::{
    IntersectionRecord, ObserverCallback, ObserverConstructor, ObserverOptions, Threshold,
    ViewportObserver, clear_observer_backend, install_observer_backend, is_observer_available,
};
pub use registry::{ObserverRegistry, acquire, reset_shared};
