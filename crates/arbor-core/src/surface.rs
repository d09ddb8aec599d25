//! Retained element tree that hosts rendered content.
//!
//! The [`Surface`] is the toolkit-independent stand-in for a document: an arena
//! of elements with parent-child containment, ordered children, a class list,
//! attributes, inline styles, and text. Views insert their elements into a
//! surface owned by the host, and skins decorate those elements.
//!
//! # Key Types
//!
//! - [`ElementId`] - Generational handle for an element
//! - [`Surface`] - Arena that owns every element and its relationships
//! - [`SharedSurface`] - Thread-safe shared handle to a surface
//!
//! # Example
//!
//! ```
//! use arbor_core::Surface;
//!
//! let mut surface = Surface::new();
//! let container = surface.create_element("div");
//! let item = surface.create_element("span");
//! surface.append_child(container, item).unwrap();
//! surface.add_class(item, "highlight").unwrap();
//!
//! assert_eq!(surface.parent(item).unwrap(), Some(container));
//! assert!(surface.has_class(item, "highlight"));
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::error::{Result, SurfaceError};
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for an element in a [`Surface`].
    ///
    /// IDs are generational: once an element is removed, its ID never resolves
    /// again, even if the underlying slot is reused by a later element.
    pub struct ElementId;
}

impl ElementId {
    /// Convert the ElementId to a raw u64 value.
    ///
    /// Useful when bridging to a host toolkit that keys its widgets numerically.
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }

    /// Create an ElementId from a raw u64 value.
    ///
    /// This does not check whether the element exists in any surface.
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self::from(slotmap::KeyData::from_ffi(raw))
    }
}

/// Internal data stored for each element.
#[derive(Debug, Default)]
struct ElementData {
    tag: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    /// Ordered, duplicate-free.
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: Option<String>,
}

impl ElementData {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }
}

/// Arena of elements and their containment relationships.
#[derive(Debug, Default)]
pub struct Surface {
    elements: SlotMap<ElementId, ElementData>,
}

/// Thread-safe shared handle to a [`Surface`].
pub type SharedSurface = Arc<Mutex<Surface>>;

impl Surface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self {
            elements: SlotMap::with_key(),
        }
    }

    /// Create an empty surface wrapped for sharing between the host and views.
    pub fn shared() -> SharedSurface {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Create a detached element with the given tag name.
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        let id = self.elements.insert(ElementData::new(tag));
        tracing::trace!(target: targets::SURFACE, ?id, tag, "created element");
        id
    }

    /// Check if an element exists on this surface.
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(id)
    }

    /// Total number of live elements, attached or not.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the surface holds no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn get(&self, id: ElementId) -> Result<&ElementData> {
        self.elements.get(id).ok_or(SurfaceError::InvalidElement(id))
    }

    fn get_mut(&mut self, id: ElementId) -> Result<&mut ElementData> {
        self.elements
            .get_mut(id)
            .ok_or(SurfaceError::InvalidElement(id))
    }

    /// Tag name of an element.
    pub fn tag(&self, id: ElementId) -> Result<&str> {
        self.get(id).map(|d| d.tag.as_str())
    }

    // =========================================================================
    // Containment
    // =========================================================================

    /// Append `child` as the last child of `parent`.
    ///
    /// The child is first detached from its current container, if any.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<()> {
        self.check_placement(parent, child)?;
        self.unlink(child);
        self.get_mut(parent)?.children.push(child);
        self.get_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Insert `element` directly after `reference` in the reference's container.
    pub fn insert_after(&mut self, reference: ElementId, element: ElementId) -> Result<()> {
        let parent = self
            .get(reference)?
            .parent
            .ok_or(SurfaceError::Detached(reference))?;
        self.check_placement(parent, element)?;
        self.unlink(element);

        let siblings = &mut self.get_mut(parent)?.children;
        let position = siblings
            .iter()
            .position(|&sibling| sibling == reference)
            .ok_or(SurfaceError::Detached(reference))?;
        siblings.insert(position + 1, element);
        self.get_mut(element)?.parent = Some(parent);
        Ok(())
    }

    /// Detach an element from its container without destroying it.
    pub fn detach(&mut self, id: ElementId) -> Result<()> {
        self.get(id)?;
        self.unlink(id);
        Ok(())
    }

    /// Destroy an element and all of its descendants.
    ///
    /// Returns the number of elements destroyed, including `id` itself.
    #[tracing::instrument(skip(self), target = "arbor_core::surface", level = "trace")]
    pub fn remove(&mut self, id: ElementId) -> Result<usize> {
        let descendants = self.collect_descendants(id)?;
        self.unlink(id);
        for child in &descendants {
            self.elements.remove(*child);
        }
        self.elements.remove(id);
        tracing::trace!(target: targets::SURFACE, ?id, removed = descendants.len() + 1, "removed element tree");
        Ok(descendants.len() + 1)
    }

    /// Destroy the `count` elements directly following `id` in its
    /// container, with all of their descendants.
    ///
    /// Fewer are destroyed if fewer follow. Returns the number of elements
    /// destroyed.
    #[tracing::instrument(skip(self), target = "arbor_core::surface", level = "trace")]
    pub fn remove_following(&mut self, id: ElementId, count: usize) -> Result<usize> {
        let parent = self.get(id)?.parent.ok_or(SurfaceError::Detached(id))?;
        let siblings = &mut self.get_mut(parent)?.children;
        let position = siblings
            .iter()
            .position(|&sibling| sibling == id)
            .ok_or(SurfaceError::Detached(id))?;
        let end = (position + 1 + count).min(siblings.len());
        let run: Vec<ElementId> = siblings.drain(position + 1..end).collect();

        let mut removed = 0;
        for element in run {
            for descendant in self.collect_descendants(element)? {
                self.elements.remove(descendant);
                removed += 1;
            }
            self.elements.remove(element);
            removed += 1;
        }
        tracing::trace!(target: targets::SURFACE, ?id, removed, "removed following elements");
        Ok(removed)
    }

    fn unlink(&mut self, id: ElementId) {
        let Some(parent) = self.elements.get_mut(id).and_then(|d| d.parent.take()) else {
            return;
        };
        if let Some(parent_data) = self.elements.get_mut(parent) {
            parent_data.children.retain(|&child| child != id);
        }
    }

    fn check_placement(&self, parent: ElementId, child: ElementId) -> Result<()> {
        self.get(parent)?;
        self.get(child)?;
        if self.is_ancestor_of(child, parent) {
            return Err(SurfaceError::CircularContainment { child, parent });
        }
        Ok(())
    }

    /// Whether `ancestor` is `id` itself or contains it.
    pub fn is_ancestor_of(&self, ancestor: ElementId, id: ElementId) -> bool {
        self.ancestors(id).any(|current| current == ancestor)
    }

    /// Collect all descendant IDs, children before parents.
    fn collect_descendants(&self, id: ElementId) -> Result<Vec<ElementId>> {
        let mut result = Vec::new();
        self.collect_descendants_recursive(id, &mut result)?;
        Ok(result)
    }

    fn collect_descendants_recursive(
        &self,
        id: ElementId,
        result: &mut Vec<ElementId>,
    ) -> Result<()> {
        for &child in &self.get(id)?.children {
            self.collect_descendants_recursive(child, result)?;
            result.push(child);
        }
        Ok(())
    }

    /// Get the container of an element.
    pub fn parent(&self, id: ElementId) -> Result<Option<ElementId>> {
        self.get(id).map(|d| d.parent)
    }

    /// Get the ordered children of an element.
    pub fn children(&self, id: ElementId) -> Result<&[ElementId]> {
        self.get(id).map(|d| d.children.as_slice())
    }

    /// Get the elements that follow `id` in its container, in order.
    ///
    /// A detached `id` has no siblings.
    pub fn following_siblings(&self, id: ElementId) -> Result<&[ElementId]> {
        let Some(parent) = self.get(id)?.parent else {
            return Ok(&[]);
        };
        let siblings = self.children(parent)?;
        let position = siblings
            .iter()
            .position(|&sibling| sibling == id)
            .ok_or(SurfaceError::Detached(id))?;
        Ok(&siblings[position + 1..])
    }

    /// Walk from `id` up through its containers.
    ///
    /// The iterator yields `id` first and ends at the outermost container.
    /// A removed `id` yields nothing.
    pub fn ancestors(&self, id: ElementId) -> Ancestors<'_> {
        Ancestors {
            surface: self,
            next: self.contains(id).then_some(id),
        }
    }

    // =========================================================================
    // Presentation
    // =========================================================================

    /// Add a class to an element. Adding a class twice has no effect.
    pub fn add_class(&mut self, id: ElementId, class: &str) -> Result<()> {
        let classes = &mut self.get_mut(id)?.classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
        Ok(())
    }

    /// Add several classes at once.
    pub fn add_classes<'a>(
        &mut self,
        id: ElementId,
        classes: impl IntoIterator<Item = &'a str>,
    ) -> Result<()> {
        for class in classes {
            self.add_class(id, class)?;
        }
        Ok(())
    }

    /// Remove a class from an element. Returns whether it was present.
    pub fn remove_class(&mut self, id: ElementId, class: &str) -> Result<bool> {
        let classes = &mut self.get_mut(id)?.classes;
        let before = classes.len();
        classes.retain(|c| c != class);
        Ok(classes.len() != before)
    }

    /// Whether an element has a class. Removed elements have no classes.
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.elements
            .get(id)
            .is_some_and(|d| d.classes.iter().any(|c| c == class))
    }

    /// The ordered class list of an element.
    pub fn classes(&self, id: ElementId) -> Result<&[String]> {
        self.get(id).map(|d| d.classes.as_slice())
    }

    /// Set an attribute value.
    pub fn set_attribute(
        &mut self,
        id: ElementId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<()> {
        self.get_mut(id)?
            .attributes
            .insert(name.into(), value.into());
        Ok(())
    }

    /// Get an attribute value.
    pub fn attribute(&self, id: ElementId, name: &str) -> Result<Option<&str>> {
        self.get(id)
            .map(|d| d.attributes.get(name).map(String::as_str))
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attribute(&mut self, id: ElementId, name: &str) -> Result<Option<String>> {
        Ok(self.get_mut(id)?.attributes.remove(name))
    }

    /// Set an inline style property.
    pub fn set_style(
        &mut self,
        id: ElementId,
        property: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<()> {
        self.get_mut(id)?.styles.insert(property.into(), value.into());
        Ok(())
    }

    /// Get an inline style property.
    pub fn style(&self, id: ElementId, property: &str) -> Result<Option<&str>> {
        self.get(id)
            .map(|d| d.styles.get(property).map(String::as_str))
    }

    /// Replace the text content of an element.
    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) -> Result<()> {
        self.get_mut(id)?.text = Some(text.into());
        Ok(())
    }

    /// Get the text content of an element.
    pub fn text(&self, id: ElementId) -> Result<Option<&str>> {
        self.get(id).map(|d| d.text.as_deref())
    }
}

/// Iterator over an element and its containers. See [`Surface::ancestors`].
pub struct Ancestors<'a> {
    surface: &'a Surface,
    next: Option<ElementId>,
}

impl Iterator for Ancestors<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self
            .surface
            .elements
            .get(current)
            .and_then(|d| d.parent);
        Some(current)
    }
}

static_assertions::assert_impl_all!(Surface: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    fn list(surface: &mut Surface, n: usize) -> (ElementId, Vec<ElementId>) {
        let root = surface.create_element("div");
        let items = (0..n)
            .map(|_| {
                let item = surface.create_element("div");
                surface.append_child(root, item).unwrap();
                item
            })
            .collect();
        (root, items)
    }

    #[test]
    fn test_append_and_parent() {
        let mut surface = Surface::new();
        let (root, items) = list(&mut surface, 2);
        assert_eq!(surface.children(root).unwrap(), items.as_slice());
        assert_eq!(surface.parent(items[0]).unwrap(), Some(root));
        assert_eq!(surface.parent(root).unwrap(), None);
    }

    #[test]
    fn test_insert_after() {
        let mut surface = Surface::new();
        let (root, items) = list(&mut surface, 2);
        let middle = surface.create_element("div");
        surface.insert_after(items[0], middle).unwrap();
        assert_eq!(
            surface.children(root).unwrap(),
            &[items[0], middle, items[1]]
        );

        let last = surface.create_element("div");
        surface.insert_after(items[1], last).unwrap();
        assert_eq!(surface.following_siblings(items[1]).unwrap(), &[last]);
        assert!(surface.following_siblings(last).unwrap().is_empty());
    }

    #[test]
    fn test_insert_after_detached_reference() {
        let mut surface = Surface::new();
        let lonely = surface.create_element("div");
        let other = surface.create_element("div");
        assert_eq!(
            surface.insert_after(lonely, other),
            Err(SurfaceError::Detached(lonely))
        );
    }

    #[test]
    fn test_remove_cascades() {
        let mut surface = Surface::new();
        let (root, items) = list(&mut surface, 2);
        let grandchild = surface.create_element("span");
        surface.append_child(items[0], grandchild).unwrap();

        assert_eq!(surface.remove(items[0]).unwrap(), 2);
        assert!(!surface.contains(items[0]));
        assert!(!surface.contains(grandchild));
        assert_eq!(surface.children(root).unwrap(), &[items[1]]);
    }

    #[test]
    fn test_remove_following_takes_a_run() {
        let mut surface = Surface::new();
        let (root, items) = list(&mut surface, 5);
        let nested = surface.create_element("span");
        surface.append_child(items[2], nested).unwrap();

        assert_eq!(surface.remove_following(items[0], 2).unwrap(), 3);
        assert_eq!(surface.children(root).unwrap(), &[items[0], items[3], items[4]]);
        assert!(!surface.contains(items[1]));
        assert!(!surface.contains(nested));

        // Past the end only what exists goes.
        assert_eq!(surface.remove_following(items[3], 10).unwrap(), 1);
        assert_eq!(surface.children(root).unwrap(), &[items[0], items[3]]);
        assert_eq!(surface.remove_following(items[3], 1).unwrap(), 0);
    }

    #[test]
    fn test_remove_following_detached() {
        let mut surface = Surface::new();
        let lonely = surface.create_element("div");
        assert_eq!(
            surface.remove_following(lonely, 1),
            Err(SurfaceError::Detached(lonely))
        );
        assert!(surface.following_siblings(lonely).unwrap().is_empty());
    }

    #[test]
    fn test_removed_id_never_resolves() {
        let mut surface = Surface::new();
        let first = surface.create_element("div");
        surface.remove(first).unwrap();
        let second = surface.create_element("div");
        assert_ne!(first, second);
        assert!(!surface.contains(first));
        assert_eq!(surface.tag(first), Err(SurfaceError::InvalidElement(first)));
    }

    #[test]
    fn test_circular_containment_rejected() {
        let mut surface = Surface::new();
        let (root, items) = list(&mut surface, 1);
        assert!(matches!(
            surface.append_child(items[0], root),
            Err(SurfaceError::CircularContainment { .. })
        ));
        assert!(matches!(
            surface.append_child(root, root),
            Err(SurfaceError::CircularContainment { .. })
        ));
    }

    #[test]
    fn test_ancestors_walk() {
        let mut surface = Surface::new();
        let (root, items) = list(&mut surface, 1);
        let icon = surface.create_element("i");
        surface.append_child(items[0], icon).unwrap();

        let chain: Vec<_> = surface.ancestors(icon).collect();
        assert_eq!(chain, vec![icon, items[0], root]);

        surface.remove(icon).unwrap();
        assert_eq!(surface.ancestors(icon).count(), 0);
    }

    #[test]
    fn test_classes_are_a_set() {
        let mut surface = Surface::new();
        let el = surface.create_element("div");
        surface.add_classes(el, ["a", "b", "a"]).unwrap();
        assert_eq!(surface.classes(el).unwrap(), &["a", "b"]);
        assert!(surface.remove_class(el, "a").unwrap());
        assert!(!surface.remove_class(el, "a").unwrap());
        assert!(!surface.has_class(el, "a"));
    }

    #[test]
    fn test_attributes_styles_text() {
        let mut surface = Surface::new();
        let el = surface.create_element("div");
        surface.set_attribute(el, "data-x", "1").unwrap();
        surface.set_style(el, "padding-left", "2em").unwrap();
        surface.set_text(el, "Label").unwrap();

        assert_eq!(surface.attribute(el, "data-x").unwrap(), Some("1"));
        assert_eq!(surface.style(el, "padding-left").unwrap(), Some("2em"));
        assert_eq!(surface.text(el).unwrap(), Some("Label"));
        assert_eq!(
            surface.remove_attribute(el, "data-x").unwrap(),
            Some("1".to_string())
        );
        assert_eq!(surface.attribute(el, "data-x").unwrap(), None);
    }

    #[test]
    fn test_raw_id_round_trip() {
        let mut surface = Surface::new();
        let el = surface.create_element("div");
        assert_eq!(ElementId::from_raw(el.as_raw()), el);
    }
}
