//! Click routing.
//!
//! A click may land on any element inside a node, such as an icon or a label.
//! The dispatcher walks from the origin up the containment chain to the first
//! element that carries a node record, stopping at the mount, and acts on the
//! node's state. Expanding a collapsed node marks it loading before the click
//! returns; only the fetch runs in the background.

use std::sync::Arc;

use arbor_core::logging::targets;
use arbor_core::{ElementId, Surface};

use super::engine::CollapseOutcome;
use super::tree_view::{TreeInner, ViewState};
use crate::error::Result;
use crate::model::{CollapsibleState, Node};

/// What a click resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The click did not land on a node, landed on a node that is already
    /// loading, or the view is detached.
    Ignored,
    /// A collapsed node was clicked and is now loading; its fetch runs in the
    /// background.
    Expand(ElementId),
    /// An expanded node was clicked and collapsed.
    Collapse {
        /// The node element.
        element: ElementId,
        /// What the collapse did.
        outcome: CollapseOutcome,
    },
    /// A leaf was clicked and selected.
    Select(ElementId),
}

/// Finds the node element enclosing `origin`, if any.
pub(crate) fn resolve(
    surface: &Surface,
    state: &ViewState,
    origin: ElementId,
) -> Option<(ElementId, Node)> {
    let mount = state.mount?;
    if !surface.is_ancestor_of(mount, origin) {
        return None;
    }
    surface
        .ancestors(origin)
        .take_while(|&element| element != mount)
        .find_map(|element| state.store.read(element).map(|node| (element, node)))
}

impl TreeInner {
    /// Resolves a click and routes it by node state.
    pub(crate) fn dispatch_click(self: &Arc<Self>, origin: ElementId) -> Result<Dispatch> {
        let (element, node) = {
            let (mut surface, state) = self.lock();
            let Some((element, node)) = resolve(&surface, &state, origin) else {
                tracing::trace!(target: targets::DISPATCH, ?origin, "click outside any node");
                return Ok(Dispatch::Ignored);
            };
            if node.state == CollapsibleState::None {
                self.renderer.on_node_clicked(&node, element, &mut surface)?;
            }
            (element, node)
        };

        tracing::debug!(target: targets::DISPATCH, id = %node.id, state = node.state.as_str(), "click");
        match node.state {
            CollapsibleState::Collapsed => {
                let Some(pending) = self.begin_expand(element)? else {
                    return Ok(Dispatch::Ignored);
                };
                let task = Arc::clone(self).finish_expand_boxed(pending);
                self.spawn(async move {
                    if let Err(err) = task.await {
                        tracing::debug!(target: targets::DISPATCH, %err, "expand ended with error");
                    }
                });
                Ok(Dispatch::Expand(element))
            }
            CollapsibleState::Expanded => {
                let outcome = self.collapse(element)?;
                Ok(Dispatch::Collapse { element, outcome })
            }
            CollapsibleState::None => {
                self.signals.selection_changed.emit(vec![node]);
                Ok(Dispatch::Select(element))
            }
        }
    }
}
