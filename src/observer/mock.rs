//! Mock Observer - Test double for the observation backend.
//!
//! Mirrors the contract a real host backend implements: records every
//! constructed instance, tracks observed elements both per instance and
//! globally, and lets tests flip all tracked elements to visible through
//! either visibility signal.

use std::cell::RefCell;
use std::rc::Rc;

use super::backend::{
    IntersectionRecord, ObserverCallback, ObserverOptions, ViewportObserver,
    clear_observer_backend, install_observer_backend,
};

// =============================================================================
// Mock State
// =============================================================================

thread_local! {
    /// Every observer instance the mock backend has constructed.
    static INSTANCES: RefCell<Vec<Rc<MockObserver>>> = const { RefCell::new(Vec::new()) };

    /// Elements observed across all instances.
    static GLOBALLY_TRACKED: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// Which visibility signal `make_elements_visible` reports.
#[derive(Clone, Copy, Debug)]
pub(crate) enum VisibilityMode {
    /// `is_intersecting = Some(true)`, ratio stays zero.
    ByIntersecting,
    /// `is_intersecting` unreported, ratio above zero.
    ByRatio,
}

impl VisibilityMode {
    fn record(self, target: usize) -> IntersectionRecord {
        match self {
            VisibilityMode::ByIntersecting => IntersectionRecord {
                target,
                is_intersecting: Some(true),
                intersection_ratio: 0.0,
            },
            VisibilityMode::ByRatio => IntersectionRecord {
                target,
                is_intersecting: None,
                intersection_ratio: 0.1,
            },
        }
    }
}

// =============================================================================
// Mock Observer
// =============================================================================

/// Recorded observer instance with inspectable configuration.
pub(crate) struct MockObserver {
    callback: ObserverCallback,
    pub(crate) root: Option<usize>,
    pub(crate) root_margin: String,
    thresholds: Vec<f64>,
    tracked_elements: RefCell<Vec<usize>>,
}

impl ViewportObserver for MockObserver {
    fn observe(&self, element: usize) {
        self.tracked_elements.borrow_mut().push(element);
        GLOBALLY_TRACKED.with(|tracked| tracked.borrow_mut().push(element));
    }

    fn unobserve(&self, element: usize) {
        let mut tracked = self.tracked_elements.borrow_mut();
        if let Some(position) = tracked.iter().position(|&e| e == element) {
            tracked.remove(position);
        }
        GLOBALLY_TRACKED.with(|global| {
            let mut global = global.borrow_mut();
            if let Some(position) = global.iter().position(|&e| e == element) {
                global.remove(position);
            }
        });
    }

    fn disconnect(&self) {
        let elements: Vec<usize> = self.tracked_elements.borrow_mut().drain(..).collect();
        GLOBALLY_TRACKED.with(|global| {
            let mut global = global.borrow_mut();
            for element in elements {
                if let Some(position) = global.iter().position(|&e| e == element) {
                    global.remove(position);
                }
            }
        });
    }

    fn thresholds(&self) -> Vec<f64> {
        self.thresholds.clone()
    }
}

// =============================================================================
// Backend Control
// =============================================================================

/// Install a mock backend that records every constructed instance.
pub(crate) fn install_mock_backend() {
    install_observer_backend(Rc::new(
        |callback: ObserverCallback, options: &ObserverOptions| {
            let observer = Rc::new(MockObserver {
                callback,
                root: options.root,
                root_margin: options.root_margin.clone().unwrap_or_else(|| "0".to_string()),
                thresholds: options
                    .threshold
                    .as_ref()
                    .map(|threshold| threshold.normalized())
                    .unwrap_or_default(),
                tracked_elements: RefCell::new(Vec::new()),
            });
            INSTANCES.with(|instances| instances.borrow_mut().push(observer.clone()));
            observer as Rc<dyn ViewportObserver>
        },
    ));
}

/// Clear recorded instances and uninstall the backend.
pub(crate) fn reset_mock() {
    INSTANCES.with(|instances| instances.borrow_mut().clear());
    GLOBALLY_TRACKED.with(|tracked| tracked.borrow_mut().clear());
    clear_observer_backend();
}

// =============================================================================
// Test Drivers
// =============================================================================

/// Report every currently tracked element as visible, on every instance.
pub(crate) fn make_elements_visible(mode: VisibilityMode) {
    let instances: Vec<Rc<MockObserver>> = INSTANCES.with(|i| i.borrow().clone());
    for observer in instances {
        // Snapshot first: callbacks deregister elements mid-delivery.
        let elements: Vec<usize> = observer.tracked_elements.borrow().clone();
        let records: Vec<IntersectionRecord> =
            elements.into_iter().map(|e| mode.record(e)).collect();
        (observer.callback)(&records);
    }
}

/// Deliver an arbitrary batch of records to every instance's callback.
pub(crate) fn deliver_records(records: &[IntersectionRecord]) {
    let instances: Vec<Rc<MockObserver>> = INSTANCES.with(|i| i.borrow().clone());
    for observer in instances {
        (observer.callback)(records);
    }
}

// =============================================================================
// Inspection
// =============================================================================

/// Number of observer instances constructed so far.
pub(crate) fn instance_count() -> usize {
    INSTANCES.with(|instances| instances.borrow().len())
}

/// The most recently constructed instance, if any.
pub(crate) fn last_instance() -> Option<Rc<MockObserver>> {
    INSTANCES.with(|instances| instances.borrow().last().cloned())
}

/// Elements currently observed across all instances.
pub(crate) fn globally_tracked_count() -> usize {
    GLOBALLY_TRACKED.with(|tracked| tracked.borrow().len())
}
