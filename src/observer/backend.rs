//! Observer Backend - Visibility-observation capability contract.
//!
//! The engine never computes viewport intersection itself. A host runtime
//! (or a test harness) installs a constructor for its observer
//! implementation; the registry asks the backend for one instance and feeds
//! it elements to watch. When no backend is installed, lazy components fall
//! back to immediate loading.
//!
//! # API
//!
//! - `install_observer_backend(ctor)` - Install the host's constructor
//! - `clear_observer_backend()` - Remove it (the runtime went away)
//! - `is_observer_available()` - Presence check, re-evaluated per call

use std::cell::RefCell;
use std::rc::Rc;

// =============================================================================
// Observation Contract
// =============================================================================

/// One visibility-change record delivered by an observer.
///
/// Different observer implementations report visibility through one signal
/// or the other, so the dispatch treats either as sufficient.
#[derive(Clone, Debug, PartialEq)]
pub struct IntersectionRecord {
    /// Element index the record refers to.
    pub target: usize,
    /// Whether the element intersects the root (None if not reported).
    pub is_intersecting: Option<bool>,
    /// Fraction of the element inside the root (0.0 if not reported).
    pub intersection_ratio: f64,
}

impl IntersectionRecord {
    /// True if either visibility signal says the element is on screen.
    pub fn is_visible(&self) -> bool {
        self.is_intersecting.unwrap_or(false) || self.intersection_ratio > 0.0
    }
}

/// A live observer instance owned by the backend.
pub trait ViewportObserver {
    /// Start watching an element.
    fn observe(&self, element: usize);
    /// Stop watching an element. Unknown elements are a no-op.
    fn unobserve(&self, element: usize);
    /// Stop watching everything.
    fn disconnect(&self);
    /// Normalized threshold list the instance was constructed with.
    fn thresholds(&self) -> Vec<f64>;
}

/// Callback handed to the constructor; receives batches of records.
pub type ObserverCallback = Rc<dyn Fn(&[IntersectionRecord])>;

/// Constructor for the host's observer implementation.
pub type ObserverConstructor =
    Rc<dyn Fn(ObserverCallback, &ObserverOptions) -> Rc<dyn ViewportObserver>>;

// =============================================================================
// Observer Options
// =============================================================================

/// Intersection threshold: a single ratio or a list of ratios.
#[derive(Clone, Debug, PartialEq)]
pub enum Threshold {
    /// Fire when visibility crosses this single ratio.
    Ratio(f64),
    /// Fire at each of these ratios.
    Ratios(Vec<f64>),
}

impl Threshold {
    /// Normalize into a list, the form observer instances report back.
    pub fn normalized(&self) -> Vec<f64> {
        match self {
            Threshold::Ratio(value) => vec![*value],
            Threshold::Ratios(values) => values.clone(),
        }
    }
}

/// Configuration passed through unchanged to the observer constructor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObserverOptions {
    /// Element index to use as the intersection root (None = viewport).
    pub root: Option<usize>,
    /// Margin string applied around the root, in the backend's own syntax.
    pub root_margin: Option<String>,
    /// Visibility ratio(s) at which records are delivered.
    pub threshold: Option<Threshold>,
}

// =============================================================================
// Backend Installation
// =============================================================================

thread_local! {
    /// The installed observer constructor, if any.
    static CONSTRUCTOR: RefCell<Option<ObserverConstructor>> = const { RefCell::new(None) };
}

/// Install the host runtime's observer constructor.
///
/// Replaces any previously installed backend. Installation does not affect
/// component families already created without one.
pub fn install_observer_backend(constructor: ObserverConstructor) {
    #[cfg(feature = "tracing")]
    tracing::trace!("observer backend installed");

    CONSTRUCTOR.with(|slot| {
        *slot.borrow_mut() = Some(constructor);
    });
}

/// Remove the installed observer constructor.
pub fn clear_observer_backend() {
    #[cfg(feature = "tracing")]
    tracing::trace!("observer backend cleared");

    CONSTRUCTOR.with(|slot| {
        *slot.borrow_mut() = None;
    });
}

/// Check whether a visibility-observation backend is installed.
///
/// Pure presence check with no side effects. Callers must re-evaluate this
/// at each decision point rather than caching the answer: test harnesses
/// and embedded runtimes install and remove backends between calls.
pub fn is_observer_available() -> bool {
    CONSTRUCTOR.with(|slot| slot.borrow().is_some())
}

/// Get the installed constructor, if any.
pub(crate) fn installed_backend() -> Option<ObserverConstructor> {
    CONSTRUCTOR.with(|slot| slot.borrow().clone())
}
