//! Bootstrap-style list-group skin.
//!
//! Each node renders as
//!
//! ```text
//! <div class="list-group-item list-group-item-action">
//!   <i class="bi bi-chevron-right"></i>   expando, reflects state
//!   <i class="bi bi-folder"></i>          icon, from the node's Icon
//!   <span>Label</span>
//! </div>
//! ```
//!
//! Clicking a leaf moves the `active` class to it.

use arbor_core::{ElementId, Surface};

use crate::model::{CollapsibleState, Icon, Node};
use crate::view::NodeRenderer;

const ITEM_CLASSES: [&str; 2] = ["list-group-item", "list-group-item-action"];
const ICON_FONT_CLASS: &str = "bi";

/// Expando classes per state, in the order they are applied.
const COLLAPSED_GLYPH: &[&str] = &["bi-chevron-right"];
const EXPANDED_GLYPH: &[&str] = &["bi-chevron-down"];
const LOADING_GLYPH: &[&str] = &["bi-hourglass", "rotating"];
const LEAF_GLYPH: &[&str] = &["bi-dot"];

/// Class marking the selected leaf.
pub const ACTIVE_CLASS: &str = "active";

/// Renders nodes as list-group rows with an expando glyph and an icon.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListGroupSkin;

impl ListGroupSkin {
    /// Creates the skin.
    pub fn new() -> Self {
        Self
    }

    fn glyph(node: &Node) -> &'static [&'static str] {
        if node.loading {
            return LOADING_GLYPH;
        }
        match node.state {
            CollapsibleState::None => LEAF_GLYPH,
            CollapsibleState::Collapsed => COLLAPSED_GLYPH,
            CollapsibleState::Expanded => EXPANDED_GLYPH,
        }
    }

    /// The expando is the first child of the node element.
    fn expando(surface: &Surface, element: ElementId) -> arbor_core::Result<Option<ElementId>> {
        Ok(surface.children(element)?.first().copied())
    }

    fn show_state(
        &self,
        node: &Node,
        element: ElementId,
        surface: &mut Surface,
    ) -> arbor_core::Result<()> {
        let Some(expando) = Self::expando(surface, element)? else {
            return Ok(());
        };
        let stale: Vec<String> = surface
            .classes(expando)?
            .iter()
            .filter(|class| class.as_str() != ICON_FONT_CLASS)
            .cloned()
            .collect();
        for class in &stale {
            surface.remove_class(expando, class)?;
        }
        surface.add_classes(expando, Self::glyph(node).iter().copied())
    }

    fn render_icon(icon: Option<&Icon>, surface: &mut Surface) -> arbor_core::Result<ElementId> {
        match icon {
            Some(Icon::Image { src }) => {
                let img = surface.create_element("img");
                surface.set_attribute(img, "src", src.as_str())?;
                Ok(img)
            }
            Some(Icon::Class(class)) => {
                let i = surface.create_element("i");
                surface.add_classes(i, [ICON_FONT_CLASS, class.as_str()])?;
                Ok(i)
            }
            Some(Icon::Classes { classes }) => {
                let i = surface.create_element("i");
                surface.add_class(i, ICON_FONT_CLASS)?;
                surface.add_classes(i, classes.iter().map(String::as_str))?;
                Ok(i)
            }
            None => {
                let i = surface.create_element("i");
                surface.add_class(i, ICON_FONT_CLASS)?;
                Ok(i)
            }
        }
    }
}

impl NodeRenderer for ListGroupSkin {
    fn render_node(&self, node: &Node, surface: &mut Surface) -> arbor_core::Result<ElementId> {
        let element = surface.create_element("div");
        surface.add_classes(element, ITEM_CLASSES)?;

        let expando = surface.create_element("i");
        surface.add_class(expando, ICON_FONT_CLASS)?;
        surface.add_classes(expando, Self::glyph(node).iter().copied())?;
        surface.append_child(element, expando)?;

        let icon = Self::render_icon(node.icon.as_ref(), surface)?;
        surface.append_child(element, icon)?;

        let label = surface.create_element("span");
        surface.set_text(label, node.label.clone())?;
        surface.append_child(element, label)?;

        Ok(element)
    }

    fn on_node_clicked(
        &self,
        _node: &Node,
        element: ElementId,
        surface: &mut Surface,
    ) -> arbor_core::Result<()> {
        if let Some(list) = surface.parent(element)? {
            let rows = surface.children(list)?.to_vec();
            for row in rows {
                surface.remove_class(row, ACTIVE_CLASS)?;
            }
        }
        surface.add_class(element, ACTIVE_CLASS)
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
