//! Observer Registry - Shared visibility observation across instances.
//!
//! One registry (and at most one observer instance) serves every lazy
//! component family in the process. The registry owns the mapping from
//! observed element indices to their activation callbacks and routes
//! observation events to the right one.
//!
//! The observer instance is created lazily on first acquisition. Whatever
//! configuration the first caller supplies wins for the process lifetime;
//! options passed on later acquisitions are silently discarded.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use ahash::AHashMap;

use crate::types::ActivationCallback;

use super::backend::{
    IntersectionRecord, ObserverCallback, ObserverOptions, ViewportObserver, installed_backend,
};

// =============================================================================
// Registry
// =============================================================================

/// Shared bookkeeping for visibility-triggered activation.
///
/// Holds the element → callback mapping and the single observer instance.
/// The registry never owns elements; it only references them by index.
pub struct ObserverRegistry {
    /// Observed elements mapped to their activation callbacks.
    tracked: RefCell<AHashMap<usize, ActivationCallback>>,
    /// The one observer instance, once a backend has constructed it.
    instance: RefCell<Option<Rc<dyn ViewportObserver>>>,
}

thread_local! {
    /// The process-wide shared registry, created on first acquisition.
    static SHARED: RefCell<Option<Rc<ObserverRegistry>>> = const { RefCell::new(None) };
}

/// Get the shared registry, creating it (and, when a backend is installed,
/// its observer instance) on first use.
///
/// `options` are forwarded to the observer constructor only when this call
/// actually constructs the instance; afterwards they are ignored. Without a
/// backend the registry is still returned and usable as bookkeeping, but no
/// observation events will ever reach it.
pub fn acquire(options: Option<&ObserverOptions>) -> Rc<ObserverRegistry> {
    let registry = SHARED.with(|slot| {
        slot.borrow_mut()
            .get_or_insert_with(|| Rc::new(ObserverRegistry::new()))
            .clone()
    });
    ObserverRegistry::ensure_instance(&registry, options);
    registry
}

/// Drop the shared registry and disconnect its observer (for testing).
pub fn reset_shared() {
    let registry = SHARED.with(|slot| slot.borrow_mut().take());
    if let Some(registry) = registry {
        if let Some(observer) = registry.instance.borrow().as_ref() {
            observer.disconnect();
        }
        registry.tracked.borrow_mut().clear();
    }
}

impl ObserverRegistry {
    fn new() -> Self {
        Self {
            tracked: RefCell::new(AHashMap::new()),
            instance: RefCell::new(None),
        }
    }

    /// Construct the observer instance if none exists and a backend is
    /// installed. First caller's options win; later options are discarded.
    fn ensure_instance(registry: &Rc<ObserverRegistry>, options: Option<&ObserverOptions>) {
        if registry.instance.borrow().is_some() {
            return;
        }
        let Some(constructor) = installed_backend() else {
            return;
        };

        // The dispatch closure outlives any single mount, so it holds the
        // registry weakly to avoid a registry ↔ observer cycle.
        let weak: Weak<ObserverRegistry> = Rc::downgrade(registry);
        let callback: ObserverCallback = Rc::new(move |records| {
            if let Some(registry) = weak.upgrade() {
                registry.dispatch(records);
            }
        });

        let options = options.cloned().unwrap_or_default();

        #[cfg(feature = "tracing")]
        tracing::trace!(?options, "constructing observer instance");

        let observer = constructor(callback, &options);
        *registry.instance.borrow_mut() = Some(observer);
    }

    /// Route a batch of visibility records to their callbacks.
    ///
    /// Records for unregistered elements are silently ignored; a
    /// deregistration may have raced an in-flight event.
    fn dispatch(&self, records: &[IntersectionRecord]) {
        for record in records {
            // Clone the callback out of the map first: invoking it
            // deregisters the element, which needs the map borrow.
            let callback = self.tracked.borrow().get(&record.target).cloned();

            if let Some(callback) = callback {
                if record.is_visible() {
                    callback();
                }
            }
        }
    }

    /// Start tracking an element and observing it when an instance exists.
    pub fn register(&self, element: usize, callback: ActivationCallback) {
        #[cfg(feature = "tracing")]
        tracing::trace!(element, "registering element for observation");

        self.tracked.borrow_mut().insert(element, callback);
        if let Some(observer) = self.instance.borrow().as_ref() {
            observer.observe(element);
        }
    }

    /// Stop tracking an element. Idempotent: deregistering an element that
    /// is not present is a no-op, not a failure.
    pub fn deregister(&self, element: usize) {
        let was_tracked = self.tracked.borrow_mut().remove(&element).is_some();

        #[cfg(feature = "tracing")]
        tracing::trace!(element, was_tracked, "deregistering element");

        if was_tracked {
            if let Some(observer) = self.instance.borrow().as_ref() {
                observer.unobserve(element);
            }
        }
    }

    /// The observer instance, if one has been constructed.
    pub fn observer(&self) -> Option<Rc<dyn ViewportObserver>> {
        self.instance.borrow().clone()
    }

    /// Whether an element is currently tracked.
    pub fn is_tracked(&self, element: usize) -> bool {
        self.tracked.borrow().contains_key(&element)
    }

    /// Number of currently tracked elements.
    pub fn tracked_count(&self) -> usize {
        self.tracked.borrow().len()
    }
}
