//! Loadable - Deferred component loading capability.
//!
//! A loadable component wraps a loader function and resolves it at most once.
//! Until something forces resolution (a mount, `preload`, or `load`), the
//! loader is never invoked, so the cost of building an expensive subtree is
//! deferred until it is actually needed.
//!
//! The engine treats this module as an opaque collaborator: it only ever
//! triggers `preload`/`load`/`mount` and forwards their results. Retry and
//! caching policy beyond resolve-once belong to the loader itself.
//!
//! # Example
//!
//! ```ignore
//! use spark_lazy::loadable::{self, ComponentFn, LoadOptions};
//!
//! let loadable = loadable::load::<()>(
//!     Rc::new(|| {
//!         let component: ComponentFn<()> = Rc::new(|_props| build_heavy_panel());
//!         Ok(component)
//!     }),
//!     LoadOptions::default(),
//! );
//!
//! loadable.preload();               // resolve now, mount later
//! let cleanup = loadable.mount(&());
//! ```

use std::cell::RefCell;
use std::error::Error;
use std::rc::Rc;

use crate::types::{Cleanup, RenderFn};

// =============================================================================
// Loading Contract
// =============================================================================

/// Opaque loader failure, propagated unmodified to the caller.
pub type LoadError = Box<dyn Error>;

/// A resolved component: mounts with its props and returns a cleanup.
pub type ComponentFn<P> = Rc<dyn Fn(&P) -> Cleanup>;

/// Loader function producing the component on first demand.
pub type Loader<P> = Rc<dyn Fn() -> Result<ComponentFn<P>, LoadError>>;

/// Options for a loadable component family.
#[derive(Clone, Default)]
pub struct LoadOptions {
    /// Rendered while the component is not yet available.
    pub fallback: Option<RenderFn>,
}

// =============================================================================
// Loadable Component
// =============================================================================

/// A component whose construction is deferred behind a loader.
///
/// Successful resolutions are cached, so the loader runs at most once per
/// family no matter how many instances mount. Failed resolutions are not
/// cached; the next trigger invokes the loader again.
pub struct LoadableComponent<P: 'static> {
    loader: Loader<P>,
    options: LoadOptions,
    resolved: RefCell<Option<ComponentFn<P>>>,
}

/// Create a loadable component from a loader and options.
pub fn load<P: 'static>(loader: Loader<P>, options: LoadOptions) -> LoadableComponent<P> {
    LoadableComponent {
        loader,
        options,
        resolved: RefCell::new(None),
    }
}

impl<P: 'static> LoadableComponent<P> {
    /// Resolve the loader, caching the component on success.
    fn resolve(&self) -> Result<ComponentFn<P>, LoadError> {
        if let Some(component) = self.resolved.borrow().as_ref() {
            return Ok(component.clone());
        }

        let component = (self.loader)()?;
        *self.resolved.borrow_mut() = Some(component.clone());
        Ok(component)
    }

    /// Force resolution, discarding the outcome (fire-and-forget).
    pub fn preload(&self) {
        let _ = self.resolve();
    }

    /// Force resolution and report completion.
    ///
    /// Loader failures are returned unmodified.
    pub fn load(&self) -> Result<(), LoadError> {
        self.resolve().map(|_| ())
    }

    /// Mount the component with the given props.
    ///
    /// If resolution fails, the fallback (when supplied) is mounted instead;
    /// the error itself surfaces through [`load`](Self::load).
    pub fn mount(&self, props: &P) -> Cleanup {
        match self.resolve() {
            Ok(component) => component(props),
            Err(_) => match &self.options.fallback {
                Some(fallback) => fallback(),
                None => Box::new(|| {}),
            },
        }
    }

    /// Whether the loader has successfully resolved.
    pub fn is_resolved(&self) -> bool {
        self.resolved.borrow().is_some()
    }

    /// The options this family was created with.
    pub fn options(&self) -> &LoadOptions {
        &self.options
    }
}
