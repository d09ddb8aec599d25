//! The capability a skin implements to draw nodes.
//!
//! The engine never depends on a concrete skin. It builds node elements and
//! notifies the renderer at every state transition through [`NodeRenderer`];
//! the renderer decides classes, icons, and child elements.
//!
//! # Contract
//!
//! - [`render_node`](NodeRenderer::render_node) returns a fresh, detached
//!   element. The engine positions it, adds its own node class and indentation,
//!   and records the node.
//! - Reaction hooks may only change presentation (classes, text, attributes,
//!   child decorations). They must not move or remove the node element, and they
//!   must not call back into the tree view: hooks run while the view holds the
//!   surface lock.
//!
//! # Example
//!
//! ```
//! use arbor::model::Node;
//! use arbor::view::NodeRenderer;
//! use arbor_core::{ElementId, Surface};
//!
//! struct Bare;
//!
//! impl NodeRenderer for Bare {
//!     fn render_node(&self, node: &Node, surface: &mut Surface) -> arbor_core::Result<ElementId> {
//!         let el = surface.create_element("div");
//!         surface.set_text(el, node.label.clone())?;
//!         Ok(el)
//!     }
//! }
//! ```

use arbor_core::{ElementId, Surface};

use crate::error::ProviderError;
use crate::model::Node;

/// Builds node elements and reacts to node transitions.
///
/// Every hook except [`render_node`](Self::render_node) has a no-op default so
/// minimal skins stay small.
pub trait NodeRenderer: Send + Sync {
    /// Builds a new element for `node`.
    fn render_node(&self, node: &Node, surface: &mut Surface) -> arbor_core::Result<ElementId>;

    /// A leaf was clicked.
    fn on_node_clicked(
        &self,
        _node: &Node,
        _element: ElementId,
        _surface: &mut Surface,
    ) -> arbor_core::Result<()> {
        Ok(())
    }

    /// The node started fetching its children.
    fn on_node_loading(
        &self,
        _node: &Node,
        _element: ElementId,
        _surface: &mut Surface,
    ) -> arbor_core::Result<()> {
        Ok(())
    }

    /// The node's children were removed.
    fn on_node_collapsed(
        &self,
        _node: &Node,
        _element: ElementId,
        _surface: &mut Surface,
    ) -> arbor_core::Result<()> {
        Ok(())
    }

    /// The node's children were inserted.
    fn on_node_expanded(
        &self,
        _node: &Node,
        _element: ElementId,
        _surface: &mut Surface,
    ) -> arbor_core::Result<()> {
        Ok(())
    }

    /// Fetching the node's children failed and the node went back to collapsed.
    ///
    /// Defaults to [`on_node_collapsed`](Self::on_node_collapsed).
    fn on_node_failed(
        &self,
        node: &Node,
        element: ElementId,
        surface: &mut Surface,
        _error: &ProviderError,
    ) -> arbor_core::Result<()> {
        self.on_node_collapsed(node, element, surface)
    }
}
