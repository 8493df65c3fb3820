//! Core types - Component model vocabulary.
//!
//! These types define the contract between the lazy-loading engine and the
//! host component model: components are mount functions that return a
//! cleanup, renderables are re-mountable closures, and activation callbacks
//! are identity-comparable one-shot triggers.

use std::rc::Rc;

// =============================================================================
// Cleanup Function
// =============================================================================

/// Cleanup function returned by mounting a component.
///
/// Call this to unmount the component and release resources.
pub type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// Renderables and Callbacks
// =============================================================================

/// A re-mountable renderable unit (fallback visuals, loaded content).
///
/// Using Rc<dyn Fn> instead of Box<dyn FnOnce> allows the same renderable
/// to be mounted by several placeholder instances without ownership issues.
pub type RenderFn = Rc<dyn Fn() -> Cleanup>;

/// Zero-argument callback that transitions exactly one placeholder instance
/// from unloaded to loaded.
///
/// Identity matters: the observer registry keys a callback by its element,
/// and the activation facade removes it from its pending list by
/// `Rc::ptr_eq`. Both references are always excised together.
pub type ActivationCallback = Rc<dyn Fn()>;

// =============================================================================
// Dimensions
// =============================================================================

/// Layout dimension for the placeholder wrapper.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Dimension {
    /// Auto-size based on content.
    Auto,
    /// Absolute size in terminal cells.
    Cells(u16),
    /// Percentage of parent size (0-100).
    Percent(f32),
}

impl Default for Dimension {
    fn default() -> Self {
        Self::Auto
    }
}

impl From<u16> for Dimension {
    fn from(value: u16) -> Self {
        if value == 0 {
            Self::Auto
        } else {
            Self::Cells(value)
        }
    }
}
