//! Runtime node records.

use serde::{Deserialize, Serialize};

use super::item::{CollapsibleState, Icon, Item};

/// Runtime record of a displayed tree entry.
///
/// A node carries everything its [`Item`] did plus its depth in the tree and
/// whether its children are currently being fetched. The state is never
/// `loading` on its own: a loading node keeps the state it had when the fetch
/// began.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Identifier from the provider.
    pub id: String,
    /// Display text.
    pub label: String,
    /// Optional presentation hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    /// Collapsible state.
    #[serde(default)]
    pub state: CollapsibleState,
    /// Depth in the hierarchy; roots are at level 0.
    pub level: usize,
    /// Whether a fetch for this node's children is outstanding.
    #[serde(default)]
    pub loading: bool,
}

impl Node {
    /// Materializes a provider item at the given depth.
    pub fn from_item(item: Item, level: usize) -> Self {
        let state = item.resolved_state();
        Self {
            id: item.id,
            label: item.label,
            icon: item.icon,
            state,
            level,
            loading: false,
        }
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        self.state.is_leaf()
    }

    /// Whether this node's children are displayed.
    pub fn is_expanded(&self) -> bool {
        self.state == CollapsibleState::Expanded
    }
}
