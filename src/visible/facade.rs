//! Activation Facade - Per-family force-activation state.
//!
//! Each call to the factory creates one facade, shared by every instance the
//! returned component spawns. It remembers whether the family has already
//! been force-activated and keeps the activation callbacks of instances that
//! are still waiting on visibility.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::types::ActivationCallback;

// =============================================================================
// Facade
// =============================================================================

/// Shared activation state for one lazy component family.
#[derive(Default)]
pub struct ActivationFacade {
    /// Switched to true the first time the family is force-activated.
    /// Monotonic: never resets.
    activated: Cell<bool>,
    /// Callbacks of mounted, still-unloaded instances, in registration order.
    pending: RefCell<Vec<ActivationCallback>>,
}

impl ActivationFacade {
    /// Create an empty facade.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the family has been force-activated.
    ///
    /// Instances mounted afterwards initialize directly into the loaded
    /// state instead of registering for observation.
    pub fn is_activated(&self) -> bool {
        self.activated.get()
    }

    /// Number of instances still waiting on visibility.
    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Append an instance's activation callback.
    pub(crate) fn push(&self, callback: ActivationCallback) {
        self.pending.borrow_mut().push(callback);
    }

    /// Remove a callback by identity. Absent callbacks are a no-op.
    pub(crate) fn remove(&self, callback: &ActivationCallback) {
        self.pending
            .borrow_mut()
            .retain(|pending| !Rc::ptr_eq(pending, callback));
    }

    /// Activate every pending instance exactly once.
    ///
    /// Idempotent: only the first call does anything, guarding against
    /// `preload()` and `load()` both firing, or repeated calls. Callbacks
    /// run in registration order on a snapshot of the list, because each
    /// one removes itself from the live list as its instance transitions.
    pub fn force_activate_all(&self) {
        if self.activated.get() {
            return;
        }
        self.activated.set(true);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            pending = self.pending.borrow().len(),
            "force-activating pending instances"
        );

        let callbacks: Vec<ActivationCallback> = self.pending.borrow().clone();
        for callback in callbacks {
            callback();
        }
    }
}
