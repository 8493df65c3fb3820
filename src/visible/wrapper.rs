//! Placeholder Wrapper - Neutral container for unloaded instances.
//!
//! While an instance waits for visibility it renders a bare container bound
//! to its element index. The container always keeps a non-zero footprint
//! (1×1 cells minimum) so an observer can still consider it visible, and it
//! hosts the fallback visual when one was supplied.

use std::cell::RefCell;

use ahash::AHashMap;

use crate::engine::{
    allocate_index, on_destroy, pop_parent_context, push_parent_context, release_index,
};
use crate::types::{Cleanup, Dimension, RenderFn};

// =============================================================================
// Wrapper Style
// =============================================================================

/// Layout overrides for the placeholder container.
///
/// Unset fields fall back to the neutral defaults; only `min_width` and
/// `min_height` have non-empty defaults, keeping the footprint above zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WrapperStyle {
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    pub min_width: Option<Dimension>,
    pub min_height: Option<Dimension>,
}

impl WrapperStyle {
    /// Merge the overrides over the neutral placeholder defaults.
    pub fn resolved(&self) -> WrapperStyle {
        WrapperStyle {
            width: self.width,
            height: self.height,
            min_width: self.min_width.or(Some(Dimension::Cells(1))),
            min_height: self.min_height.or(Some(Dimension::Cells(1))),
        }
    }
}

// =============================================================================
// Placeholder Store
// =============================================================================

thread_local! {
    /// Applied style per mounted placeholder index.
    static STYLES: RefCell<AHashMap<usize, WrapperStyle>> = RefCell::new(AHashMap::new());
}

/// Style applied to the placeholder at `index`, if one is mounted there.
pub fn wrapper_style(index: usize) -> Option<WrapperStyle> {
    STYLES.with(|styles| styles.borrow().get(&index).copied())
}

/// Whether `index` is a currently mounted placeholder.
pub fn is_placeholder(index: usize) -> bool {
    STYLES.with(|styles| styles.borrow().contains_key(&index))
}

/// Number of currently mounted placeholders.
pub fn placeholder_count() -> usize {
    STYLES.with(|styles| styles.borrow().len())
}

// =============================================================================
// Mounting
// =============================================================================

/// Mount a placeholder container.
///
/// Allocates the element index, records the merged style, and mounts the
/// fallback (if any) as a child under the placeholder's parent context.
/// Returns the element index and a cleanup that unmounts the fallback and
/// releases the index.
pub(crate) fn mount_placeholder(
    style: &WrapperStyle,
    fallback: Option<&RenderFn>,
) -> (usize, Cleanup) {
    let index = allocate_index(None);

    STYLES.with(|styles| {
        styles.borrow_mut().insert(index, style.resolved());
    });
    on_destroy(index, move || {
        STYLES.with(|styles| {
            styles.borrow_mut().remove(&index);
        });
    });

    let fallback_cleanup: Option<Cleanup> = fallback.map(|render| {
        push_parent_context(index);
        let cleanup = render();
        pop_parent_context();
        cleanup
    });

    let cleanup: Cleanup = Box::new(move || {
        if let Some(cleanup) = fallback_cleanup {
            cleanup();
        }
        release_index(index);
    });

    (index, cleanup)
}
