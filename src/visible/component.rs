//! On-Visible Component - Factory and placeholder state machine.
//!
//! `create_on_visible` wires a loadable component family to the shared
//! observer registry. Each mounted instance starts as a placeholder and
//! transitions to the loaded content exactly once, either when the observer
//! reports it visible or when the family is force-activated through
//! `preload()`/`load()`.
//!
//! # Lifecycle
//!
//! ```text
//!                    mount
//!                      │
//!              ┌───────▼────────┐  visibility event
//!              │    Unloaded    │  or force-activation
//!              │  (placeholder, ├─────────────────────┐
//!              │   registered)  │                     │
//!              └───────┬────────┘             ┌───────▼──────┐
//!                      │ unmount              │    Loaded    │
//!                      ▼                      │  (content)   │
//!                 deregistered                └──────────────┘
//! ```
//!
//! The unloaded branch registers the instance's activation callback with
//! both the observer registry (keyed by element) and the family facade;
//! leaving the branch - through activation or unmount - excises both
//! references together.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spark_signals::{Signal, effect, effect_scope, on_scope_dispose, signal};

use crate::engine::{get_current_parent_index, pop_parent_context, push_parent_context};
use crate::loadable::{self, LoadError, LoadOptions, LoadableComponent, Loader};
use crate::observer::{self, ObserverRegistry, is_observer_available};
use crate::types::{ActivationCallback, Cleanup, RenderFn};

use super::facade::ActivationFacade;
use super::wrapper::{self, WrapperStyle};

// =============================================================================
// Props
// =============================================================================

/// Per-instance placeholder props.
///
/// Consumed by the placeholder wrapper only; never forwarded to the loaded
/// content.
#[derive(Clone, Default)]
pub struct VisibleProps {
    /// Layout overrides merged over the wrapper's neutral defaults.
    pub wrapper_style: WrapperStyle,
    /// Fallback rendered inside the placeholder. The factory-level
    /// fallback, when present, takes precedence over this one.
    pub fallback: Option<RenderFn>,
}

// =============================================================================
// Factory
// =============================================================================

/// A lazily loaded component family returned by [`create_on_visible`].
pub struct OnVisible<P: 'static> {
    inner: Inner<P>,
}

enum Inner<P: 'static> {
    /// No observation backend at factory time: plain deferred loading with
    /// no visibility logic attached.
    Eager(Rc<LoadableComponent<P>>),
    /// Visibility-deferred mounting through the shared registry.
    Observed {
        loadable: Rc<LoadableComponent<P>>,
        facade: Rc<ActivationFacade>,
        registry: Rc<ObserverRegistry>,
    },
}

/// Create a component family that defers loading until visible.
///
/// Availability of the observation backend is checked here, on every call:
/// without one, the result behaves exactly like the bare loadable and
/// content loads immediately on mount. With one, the loadable is built once
/// and shared by all instances, the process-wide observer registry is
/// acquired, and one activation facade is created for the family.
pub fn create_on_visible<P: 'static>(loader: Loader<P>, options: LoadOptions) -> OnVisible<P> {
    if !is_observer_available() {
        return OnVisible {
            inner: Inner::Eager(Rc::new(loadable::load(loader, options))),
        };
    }

    let loadable = Rc::new(loadable::load(loader, options));
    let registry = observer::acquire(None);
    let facade = Rc::new(ActivationFacade::new());

    OnVisible {
        inner: Inner::Observed {
            loadable,
            facade,
            registry,
        },
    }
}

impl<P: 'static> OnVisible<P> {
    /// Mount an instance with content props only.
    pub fn mount(&self, props: P) -> Cleanup {
        self.mount_with(props, VisibleProps::default())
    }

    /// Mount an instance with content props and placeholder props.
    pub fn mount_with(&self, props: P, visible: VisibleProps) -> Cleanup {
        match &self.inner {
            Inner::Eager(loadable) => loadable.mount(&props),
            Inner::Observed {
                loadable,
                facade,
                registry,
            } => mount_observed(
                loadable.clone(),
                facade.clone(),
                registry.clone(),
                props,
                visible,
            ),
        }
    }

    /// Activate all pending instances, then preload the underlying
    /// component (fire-and-forget).
    pub fn preload(&self) {
        match &self.inner {
            Inner::Eager(loadable) => loadable.preload(),
            Inner::Observed {
                loadable, facade, ..
            } => {
                facade.force_activate_all();
                loadable.preload();
            }
        }
    }

    /// Activate all pending instances, then load the underlying component,
    /// returning its result unmodified.
    pub fn load(&self) -> Result<(), LoadError> {
        match &self.inner {
            Inner::Eager(loadable) => loadable.load(),
            Inner::Observed {
                loadable, facade, ..
            } => {
                facade.force_activate_all();
                loadable.load()
            }
        }
    }
}

// =============================================================================
// Placeholder State Machine
// =============================================================================

/// Mount one observed instance.
///
/// The `loaded` signal drives a branch swap: false mounts the registered
/// placeholder, true mounts the content. The transition is one-way and the
/// swap runs synchronously inside whatever call flipped the signal.
fn mount_observed<P: 'static>(
    loadable: Rc<LoadableComponent<P>>,
    facade: Rc<ActivationFacade>,
    registry: Rc<ObserverRegistry>,
    props: P,
    visible: VisibleProps,
) -> Cleanup {
    // Capture parent at mount time so branch swaps land under it
    let parent_index = get_current_parent_index();

    // Instances mounted after a force-activation are born loaded
    let loaded = signal(facade.is_activated());

    // Factory-level fallback wins over the per-instance prop
    let fallback = loadable.options().fallback.clone().or(visible.fallback);
    let wrapper_style = visible.wrapper_style;

    let props = Rc::new(props);

    let scope = effect_scope(false);
    let branch_cleanup: Rc<RefCell<Option<Cleanup>>> = Rc::new(RefCell::new(None));
    let was_loaded: Rc<Cell<Option<bool>>> = Rc::new(Cell::new(None));

    let cleanup_for_update = branch_cleanup.clone();
    let cleanup_for_dispose = branch_cleanup.clone();

    scope.run(move || {
        let _effect_cleanup = effect(move || {
            let is_loaded = loaded.get();

            // Skip if state unchanged
            if was_loaded.get() == Some(is_loaded) {
                return;
            }
            was_loaded.set(Some(is_loaded));

            // Tear down the previous branch. For the placeholder branch
            // this removes the callback from the facade and deregisters
            // the element, so the loaded transition excises both
            // references in the same synchronous swap.
            if let Some(prev_cleanup) = cleanup_for_update.borrow_mut().take() {
                prev_cleanup();
            }

            if let Some(parent) = parent_index {
                push_parent_context(parent);
            }

            let new_cleanup = if is_loaded {
                loadable.mount(props.as_ref())
            } else {
                mount_unloaded_branch(
                    &registry,
                    &facade,
                    &loaded,
                    &wrapper_style,
                    fallback.as_ref(),
                )
            };

            if parent_index.is_some() {
                pop_parent_context();
            }

            *cleanup_for_update.borrow_mut() = Some(new_cleanup);
        });

        on_scope_dispose(move || {
            if let Some(cleanup_fn) = cleanup_for_dispose.borrow_mut().take() {
                cleanup_fn();
            }
        });
    });

    Box::new(move || {
        scope.stop();
    })
}

/// Mount the placeholder and register the instance for activation.
fn mount_unloaded_branch(
    registry: &Rc<ObserverRegistry>,
    facade: &Rc<ActivationFacade>,
    loaded: &Signal<bool>,
    style: &WrapperStyle,
    fallback: Option<&RenderFn>,
) -> Cleanup {
    let (element, wrapper_cleanup) = wrapper::mount_placeholder(style, fallback);

    let on_visible: ActivationCallback = {
        let registry = registry.clone();
        let loaded = loaded.clone();
        Rc::new(move || {
            // Deregister before flipping: the element must never stay
            // observed once its content has loaded.
            registry.deregister(element);
            loaded.set(true);
        })
    };

    registry.register(element, on_visible.clone());
    facade.push(on_visible.clone());

    let registry = registry.clone();
    let facade = facade.clone();
    Box::new(move || {
        facade.remove(&on_visible);
        registry.deregister(element);
        wrapper_cleanup();
    })
}

// =============================================================================
// Tests
// =============================================================================
