//! Per-element node records.
//!
//! The [`MetadataStore`] is the side-table that owns every displayed node's
//! [`Node`] record, keyed by the element that displays it. Elements are only
//! lookup keys; the store is the source of truth. Because [`ElementId`] is
//! generational, an element that has been removed from the surface can never
//! alias a newer one, so presence in the store doubles as a liveness check.
//!
//! Records can also be mirrored onto their element as a JSON attribute (see
//! [`encode`] and [`decode`]) for hosts that inspect elements directly.

use std::collections::HashMap;

use arbor_core::ElementId;

use super::node::Node;
use crate::error::Result;

/// Side-table of node records keyed by element.
#[derive(Debug, Default)]
pub struct MetadataStore {
    records: HashMap<ElementId, Node>,
}

impl MetadataStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes (or overwrites) the record for `element`.
    pub fn write(&mut self, element: ElementId, node: &Node) {
        self.records.insert(element, node.clone());
    }

    /// Reads a copy of the record for `element`.
    pub fn read(&self, element: ElementId) -> Option<Node> {
        self.records.get(&element).cloned()
    }

    /// Borrows the record for `element`.
    pub fn get(&self, element: ElementId) -> Option<&Node> {
        self.records.get(&element)
    }

    /// Whether `element` carries a record.
    pub fn contains(&self, element: ElementId) -> bool {
        self.records.contains_key(&element)
    }

    /// Removes the record for `element`.
    pub fn remove(&mut self, element: ElementId) -> Option<Node> {
        self.records.remove(&element)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drops every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Elements whose record has the given provider id.
    pub fn find(&self, id: &str) -> Vec<ElementId> {
        self.records
            .iter()
            .filter(|(_, node)| node.id == id)
            .map(|(&element, _)| element)
            .collect()
    }
}

/// Serializes a record into its flat JSON form.
pub fn encode(node: &Node) -> Result<String> {
    Ok(serde_json::to_string(node)?)
}

/// Parses a record from its flat JSON form.
pub fn decode(raw: &str) -> Result<Node> {
    Ok(serde_json::from_str(raw)?)
}
