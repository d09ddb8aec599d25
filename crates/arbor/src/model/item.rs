//! Provider-facing item descriptions.

use serde::{Deserialize, Serialize};

/// Whether a tree entry can be expanded, and whether it currently is.
///
/// Serialized as `""`, `"collapsed"` and `"expanded"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CollapsibleState {
    /// The entry is a leaf and has no children.
    #[default]
    #[serde(rename = "")]
    None,
    /// The entry has children that are not displayed.
    #[serde(rename = "collapsed")]
    Collapsed,
    /// The entry's children are displayed.
    #[serde(rename = "expanded")]
    Expanded,
}

impl CollapsibleState {
    /// Whether this state describes a leaf.
    pub fn is_leaf(self) -> bool {
        self == Self::None
    }

    /// The serialized tag of this state.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Collapsed => "collapsed",
            Self::Expanded => "expanded",
        }
    }
}

/// Presentation hint for a tree entry. Skins decide how to draw it.
///
/// Serialized as a bare string, `{ "src": ... }` or `{ "classes": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Icon {
    /// A single style tag.
    Class(String),
    /// An external image reference.
    Image {
        /// Image source URL.
        src: String,
    },
    /// A set of style tags.
    Classes {
        /// Style tags, applied in order.
        classes: Vec<String>,
    },
}

impl From<&str> for Icon {
    fn from(class: &str) -> Self {
        Self::Class(class.to_string())
    }
}

impl From<String> for Icon {
    fn from(class: String) -> Self {
        Self::Class(class)
    }
}

/// A tree entry as returned by a data provider, before it is placed in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Identifier, passed back to the provider when the entry is expanded.
    pub id: String,
    /// Display text.
    pub label: String,
    /// Optional presentation hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    /// Collapsible state. `None` or absent means leaf.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<CollapsibleState>,
}

impl Item {
    /// Creates a leaf item.
    pub fn leaf(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: None,
            state: None,
        }
    }

    /// Creates a collapsed item whose children are fetched on expand.
    pub fn collapsed(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::leaf(id, label).with_state(CollapsibleState::Collapsed)
    }

    /// Creates an item that expands as soon as it is displayed.
    pub fn expanded(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::leaf(id, label).with_state(CollapsibleState::Expanded)
    }

    /// Sets the collapsible state.
    pub fn with_state(mut self, state: CollapsibleState) -> Self {
        self.state = Some(state);
        self
    }

    /// Sets the icon hint.
    pub fn with_icon(mut self, icon: impl Into<Icon>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// The collapsible state, with an absent state resolved to a leaf.
    pub fn resolved_state(&self) -> CollapsibleState {
        self.state.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_defaults_to_leaf() {
        let item: Item = serde_json::from_str(r#"{"id":"a","label":"A"}"#).unwrap();
        assert_eq!(item.state, None);
        assert_eq!(item.resolved_state(), CollapsibleState::None);
        assert!(item.resolved_state().is_leaf());
    }

    #[test]
    fn test_state_tags() {
        let item: Item =
            serde_json::from_str(r#"{"id":"a","label":"A","state":"collapsed"}"#).unwrap();
        assert_eq!(item.state, Some(CollapsibleState::Collapsed));
        let item: Item = serde_json::from_str(r#"{"id":"a","label":"A","state":""}"#).unwrap();
        assert_eq!(item.state, Some(CollapsibleState::None));
        assert_eq!(CollapsibleState::Expanded.as_str(), "expanded");
    }

    #[test]
    fn test_icon_forms() {
        let icon: Icon = serde_json::from_str(r#""bi-folder""#).unwrap();
        assert_eq!(icon, Icon::Class("bi-folder".into()));

        let icon: Icon = serde_json::from_str(r#"{"src":"/img/a.png"}"#).unwrap();
        assert_eq!(
            icon,
            Icon::Image {
                src: "/img/a.png".into()
            }
        );

        let icon: Icon = serde_json::from_str(r#"{"classes":["bi","bi-clock"]}"#).unwrap();
        assert_eq!(
            icon,
            Icon::Classes {
                classes: vec!["bi".into(), "bi-clock".into()]
            }
        );
    }

    #[test]
    fn test_builders() {
        let item = Item::collapsed("p1", "Project").with_icon("bi-folder");
        assert_eq!(item.resolved_state(), CollapsibleState::Collapsed);
        assert_eq!(item.icon, Some(Icon::Class("bi-folder".into())));
    }
}
