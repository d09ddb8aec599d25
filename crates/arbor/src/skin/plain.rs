//! Minimal skin: one element per node, a state class, and the label as text.

use arbor_core::{ElementId, Surface};

use crate::model::{CollapsibleState, Node};
use crate::view::NodeRenderer;

/// Class marking a collapsed node.
pub const COLLAPSED_CLASS: &str = "treeview-node-collapsed";
/// Class marking an expanded node.
pub const EXPANDED_CLASS: &str = "treeview-node-expanded";
/// Class marking a node whose children are being fetched.
pub const LOADING_CLASS: &str = "treeview-node-loading";
/// Class marking a leaf.
pub const LEAF_CLASS: &str = "treeview-node-leaf";

const STATE_CLASSES: [&str; 4] = [COLLAPSED_CLASS, EXPANDED_CLASS, LOADING_CLASS, LEAF_CLASS];

/// Renders each node as a `div` whose class reflects its state.
#[derive(Debug, Clone)]
pub struct PlainSkin {
    tag: String,
}

impl Default for PlainSkin {
    fn default() -> Self {
        Self::new()
    }
}

impl PlainSkin {
    /// Creates a skin rendering `div` elements.
    pub fn new() -> Self {
        Self {
            tag: "div".to_string(),
        }
    }

    /// Uses `tag` for node elements.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    fn state_class(node: &Node) -> &'static str {
        if node.loading {
            return LOADING_CLASS;
        }
        match node.state {
            CollapsibleState::None => LEAF_CLASS,
            CollapsibleState::Collapsed => COLLAPSED_CLASS,
            CollapsibleState::Expanded => EXPANDED_CLASS,
        }
    }

    fn show_state(
        &self,
        node: &Node,
        element: ElementId,
        surface: &mut Surface,
    ) -> arbor_core::Result<()> {
        for class in STATE_CLASSES {
            surface.remove_class(element, class)?;
        }
        surface.add_class(element, Self::state_class(node))
    }
}

impl NodeRenderer for PlainSkin {
    fn render_node(&self, node: &Node, surface: &mut Surface) -> arbor_core::Result<ElementId> {
        let element = surface.create_element(&self.tag);
        surface.add_class(element, Self::state_class(node))?;
        surface.set_text(element, node.label.clone())?;
        Ok(element)
    }

    fn on_node_loading(
        &self,
        node: &Node,
        element: ElementId,
        surface: &mut Surface,
    ) -> arbor_core::Result<()> {
        self.show_state(node, element, surface)
    }

    fn on_node_collapsed(
        &self,
        node: &Node,
        element: ElementId,
        surface: &mut Surface,
    ) -> arbor_core::Result<()> {
        self.show_state(node, element, surface)
    }

    fn on_node_expanded(
        &self,
        node: &Node,
        element: ElementId,
        surface: &mut Surface,
    ) -> arbor_core::Result<()> {
        self.show_state(node, element, surface)
    }
}
