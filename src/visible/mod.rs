//! Visible - Visibility-deferred component mounting.
//!
//! The pieces that turn a loadable component family into one that waits for
//! its placeholder to scroll into view:
//!
//! - [`ActivationFacade`] - per-family force-activation state shared by all
//!   instances (`preload()`/`load()` flow through it)
//! - wrapper - the neutral placeholder container with its non-zero footprint
//!   and caller style overrides
//! - [`create_on_visible`] - the factory wiring loadable + facade + shared
//!   observer registry into a component type

mod component;
mod facade;
mod wrapper;

pub use component::{OnVisible, VisibleProps, create_on_visible};
pub use facade::ActivationFacade;
pub use wrapper::{WrapperStyle, is_placeholder, placeholder_count, wrapper_style};
