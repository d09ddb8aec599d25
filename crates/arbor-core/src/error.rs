//! Error types for Arbor core.

use crate::surface::ElementId;

/// Errors produced by element surface operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// The element ID is invalid or the element has been removed.
    #[error("Invalid or removed element {0:?}")]
    InvalidElement(ElementId),

    /// Attempted to place an element inside itself or one of its descendants.
    #[error("Cannot place element {child:?} inside its own subtree at {parent:?}")]
    CircularContainment {
        /// The element being moved.
        child: ElementId,
        /// The requested new container.
        parent: ElementId,
    },

    /// The reference element has no container, so nothing can be inserted next to it.
    #[error("Element {0:?} is detached and has no siblings")]
    Detached(ElementId),
}

/// A specialized Result type for surface operations.
pub type Result<T> = std::result::Result<T, SurfaceError>;
