//! # spark-lazy
//!
//! Visibility-deferred component loading for reactive terminal UIs.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity.
//!
//! ## Architecture
//!
//! A lazy component family starts life as a loader function. Mounting an
//! instance renders a 1×1-minimum placeholder and registers it with a
//! process-wide observer registry; when the host's visibility backend
//! reports the placeholder on screen (or `preload()`/`load()` force the
//! issue), the instance swaps to the loaded content exactly once:
//!
//! ```text
//! create_on_visible(loader) → OnVisible family
//!     mount() → placeholder ──registered──▶ ObserverRegistry (one per process)
//!                   │                            │ visibility event
//!                   ▼                            ▼
//!            loaded content ◀──one-shot── activation callback
//! ```
//!
//! Hosts that cannot observe visibility install no backend; factories detect
//! the absence and return a family that loads immediately on mount, exactly
//! like the bare loadable.
//!
//! ## Modules
//!
//! - [`types`] - Core types (Cleanup, RenderFn, Dimension, ...)
//! - [`engine`] - Element handle registry and parent context
//! - [`observer`] - Observation backend contract and shared registry
//! - [`loadable`] - Deferred component loading capability
//! - [`visible`] - Placeholder state machine, facade, and factory

pub mod engine;
pub mod loadable;
pub mod observer;
pub mod types;
pub mod visible;

// Re-export commonly used items
pub use types::*;

pub use engine::{
    allocate_index, get_allocated_count, get_current_parent_index, get_id, get_index, is_allocated,
    on_destroy, pop_parent_context, push_parent_context, release_index, reset_registry,
};

pub use observer::{
    IntersectionRecord, ObserverCallback, ObserverConstructor, ObserverOptions, ObserverRegistry,
    Threshold, ViewportObserver, acquire, clear_observer_backend, install_observer_backend,
    is_observer_available, reset_shared,
};

pub use loadable::{ComponentFn, LoadError, LoadOptions, LoadableComponent, Loader, load};

pub use visible::{
    ActivationFacade, OnVisible, VisibleProps, WrapperStyle, create_on_visible, is_placeholder,
    placeholder_count, wrapper_style,
};
