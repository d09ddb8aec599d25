//! Expansion engine: lazy child fetches and display-list splicing.
//!
//! The displayed nodes are the children of the mount element, in pre-order
//! depth-first order of the expanded tree. Every operation here keeps that
//! order exact:
//!
//! - expanding a node at level `L` inserts its fetched children, at level
//!   `L + 1`, directly after it and in provider order;
//! - collapsing it removes the contiguous run of following nodes whose level is
//!   greater than `L`, which by the ordering are exactly its descendants.
//!
//! A node's `loading` flag serializes fetches per node: expand and collapse are
//! both suppressed while it is set. It is raised synchronously, before any
//! fetch starts, so a second request made right after the first already sees
//! it. Nodes the provider delivers pre-expanded are inserted with it raised. Fetches are never cancelled. When one
//! completes, its continuation first checks that the node it belongs to is
//! still displayed (its element still has a record) and drops the results if it
//! is not, which covers an ancestor collapsing or the view detaching mid-fetch.
//!
//! A fetched child list is inserted whole or not at all: every child is
//! rendered before any is placed, and a failure anywhere removes what was
//! already built.

use std::sync::Arc;

use arbor_core::logging::targets;
use arbor_core::{ElementId, Surface};
use futures_util::future::{BoxFuture, FutureExt};

use super::tree_view::{FetchFailure, TreeInner, ViewState};
use crate::error::{Result, TreeError};
use crate::model::{CollapsibleState, Item, Node, metadata};

/// Result of an expand request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandOutcome {
    /// Children were fetched and inserted.
    Expanded {
        /// Number of children inserted.
        children: usize,
    },
    /// Nothing happened: the node is loading, a leaf, or already expanded.
    Suppressed,
    /// The fetch completed after the node left the display; results were dropped.
    Discarded,
}

/// Result of a collapse request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollapseOutcome {
    /// Descendants were removed and the node is now collapsed.
    Collapsed {
        /// Number of descendant nodes removed.
        removed: usize,
    },
    /// Nothing happened: the node is loading, a leaf, or already collapsed.
    Suppressed,
}

/// A node marked loading whose fetch has not run yet.
#[derive(Debug)]
pub(crate) struct PendingExpand {
    element: ElementId,
    node: Node,
    mount: ElementId,
}

/// Outcome of inserting a fetched child list.
enum Inserted {
    Children(usize),
    Discarded,
}

/// Places built children after `insert_after`, or at the end of `mount`.
fn place(
    surface: &mut Surface,
    built: &[(ElementId, Node)],
    insert_after: Option<ElementId>,
    mount: ElementId,
) -> Result<()> {
    let mut anchor = insert_after;
    for &(element, _) in built {
        match anchor {
            Some(previous) => surface.insert_after(previous, element)?,
            None => surface.append_child(mount, element)?,
        }
        anchor = Some(element);
    }
    Ok(())
}

impl TreeInner {
    /// Writes `node` to the side-table and mirrors it onto the element.
    fn persist(
        &self,
        surface: &mut Surface,
        state: &mut ViewState,
        element: ElementId,
        node: &Node,
    ) -> Result<()> {
        state.store.write(element, node);
        if let Some(attribute) = &self.config.metadata_attribute {
            surface.set_attribute(element, attribute.as_str(), metadata::encode(node)?)?;
        }
        Ok(())
    }

    /// Renders `items` into detached, decorated and recorded elements.
    ///
    /// Each element is pushed to `built` as soon as it exists, so on failure
    /// the caller still knows everything that has to be removed.
    fn build_children(
        &self,
        surface: &mut Surface,
        state: &mut ViewState,
        items: Vec<Item>,
        level: usize,
        built: &mut Vec<(ElementId, Node)>,
    ) -> Result<()> {
        for item in items {
            let mut node = Node::from_item(item, level);
            node.loading = node.is_expanded();
            let element = self.renderer.render_node(&node, surface)?;
            built.push((element, node.clone()));

            surface.add_class(element, &self.config.node_class)?;
            surface.set_style(
                element,
                self.config.indent_property.as_str(),
                self.config.indent_for(node.level),
            )?;
            self.persist(surface, state, element, &node)?;
            if node.loading {
                self.renderer.on_node_loading(&node, element, surface)?;
            }
        }
        Ok(())
    }

    /// Fetches the roots and appends them to `mount`.
    pub(crate) async fn render_roots(self: &Arc<Self>, mount: ElementId) -> Result<usize> {
        match self.render_children(None, 0, None, mount).await {
            Ok(Inserted::Children(count)) => Ok(count),
            Ok(Inserted::Discarded) => Ok(0),
            Err(err) => {
                if let TreeError::ProviderFetch { source, .. } = &err {
                    tracing::warn!(target: targets::ENGINE, error = %source, "root fetch failed");
                    self.signals.fetch_failed.emit(FetchFailure {
                        node: None,
                        error: source.clone(),
                    });
                }
                Err(err)
            }
        }
    }

    /// Fetches the children of `parent` and inserts them at `level`.
    ///
    /// Children are chained after `insert_after`, or appended to `mount` when
    /// it is `None`. Children the provider marks as expanded are inserted
    /// loading, and their own fetches start once the list is in place.
    async fn render_children(
        self: &Arc<Self>,
        parent: Option<&str>,
        level: usize,
        insert_after: Option<ElementId>,
        mount: ElementId,
    ) -> Result<Inserted> {
        tracing::trace!(target: targets::ENGINE, parent_id = ?parent, level, "fetching children");
        let items = self
            .provider
            .get_children(parent)
            .await
            .map_err(|source| TreeError::ProviderFetch {
                parent: parent.map(str::to_owned),
                source,
            })?;

        let count = items.len();
        let auto_expand: Vec<PendingExpand> = {
            let (mut surface, mut state) = self.lock();
            if state.mount != Some(mount) {
                tracing::debug!(target: targets::ENGINE, parent_id = ?parent, "view detached during fetch, dropping children");
                return Ok(Inserted::Discarded);
            }
            if insert_after.is_some_and(|anchor| !state.store.contains(anchor)) {
                tracing::debug!(target: targets::ENGINE, parent_id = ?parent, "parent left the display during fetch, dropping children");
                return Ok(Inserted::Discarded);
            }

            let mut built = Vec::with_capacity(count);
            let inserted = self
                .build_children(&mut surface, &mut state, items, level, &mut built)
                .and_then(|()| place(&mut surface, &built, insert_after, mount));
            if let Err(err) = inserted {
                for (element, _) in &built {
                    // Already gone if an earlier element contained it.
                    let _ = surface.remove(*element);
                    state.store.remove(*element);
                }
                tracing::warn!(target: targets::ENGINE, parent_id = ?parent, %err, "rendering children failed, nothing inserted");
                return Err(err);
            }

            built
                .into_iter()
                .filter(|(_, node)| node.loading)
                .map(|(element, node)| PendingExpand {
                    element,
                    node,
                    mount,
                })
                .collect()
        };
        tracing::debug!(target: targets::ENGINE, parent_id = ?parent, level, count, "inserted children");

        for pending in auto_expand {
            let task = Arc::clone(self).finish_expand_boxed(pending);
            self.spawn(async move {
                if let Err(err) = task.await {
                    tracing::debug!(target: targets::ENGINE, %err, "auto-expand ended with error");
                }
            });
        }
        Ok(Inserted::Children(count))
    }

    /// Fetches and displays the children of the node at `element`.
    #[tracing::instrument(skip(self), target = "arbor::engine", level = "debug")]
    pub(crate) async fn expand(self: &Arc<Self>, element: ElementId) -> Result<ExpandOutcome> {
        match self.begin_expand(element)? {
            Some(pending) => self.finish_expand(pending).await,
            None => Ok(ExpandOutcome::Suppressed),
        }
    }

    /// Marks the node at `element` loading and runs the loading hook.
    ///
    /// Returns `None` when the expansion is suppressed.
    pub(crate) fn begin_expand(&self, element: ElementId) -> Result<Option<PendingExpand>> {
        let (mut surface, mut state) = self.lock();
        let mut node = state
            .store
            .read(element)
            .ok_or(TreeError::NotANode(element))?;
        if node.loading || node.is_leaf() || node.is_expanded() {
            tracing::trace!(target: targets::ENGINE, id = %node.id, loading = node.loading, "expand suppressed");
            return Ok(None);
        }
        let mount = state.mount.ok_or(TreeError::NotAttached)?;

        node.loading = true;
        self.persist(&mut surface, &mut state, element, &node)?;
        if let Err(err) = self.renderer.on_node_loading(&node, element, &mut surface) {
            node.loading = false;
            self.persist(&mut surface, &mut state, element, &node)?;
            return Err(err.into());
        }
        Ok(Some(PendingExpand {
            element,
            node,
            mount,
        }))
    }

    /// Owned, boxed [`finish_expand`](Self::finish_expand) for spawning, where
    /// the future type would otherwise contain itself.
    pub(crate) fn finish_expand_boxed(
        self: Arc<Self>,
        pending: PendingExpand,
    ) -> BoxFuture<'static, Result<ExpandOutcome>> {
        async move { self.finish_expand(pending).await }.boxed()
    }

    /// Fetches and inserts the children of a node already marked loading,
    /// then settles its state.
    async fn finish_expand(self: &Arc<Self>, pending: PendingExpand) -> Result<ExpandOutcome> {
        let PendingExpand {
            element,
            node,
            mount,
        } = pending;
        let result = self
            .render_children(Some(&node.id), node.level + 1, Some(element), mount)
            .await;

        let (mut surface, mut state) = self.lock();
        let Some(mut current) = state.store.read(element) else {
            tracing::debug!(target: targets::ENGINE, id = %node.id, "node left the display while loading");
            return Ok(ExpandOutcome::Discarded);
        };
        current.loading = false;

        match result {
            Ok(Inserted::Children(children)) => {
                current.state = CollapsibleState::Expanded;
                self.persist(&mut surface, &mut state, element, &current)?;
                self.renderer
                    .on_node_expanded(&current, element, &mut surface)?;
                drop(state);
                drop(surface);
                tracing::debug!(target: targets::ENGINE, id = %current.id, children, "expanded");
                self.signals.expanded.emit(current);
                Ok(ExpandOutcome::Expanded { children })
            }
            Ok(Inserted::Discarded) => {
                self.persist(&mut surface, &mut state, element, &current)?;
                Ok(ExpandOutcome::Discarded)
            }
            Err(err) => {
                current.state = CollapsibleState::Collapsed;
                self.persist(&mut surface, &mut state, element, &current)?;
                if let TreeError::ProviderFetch { source, .. } = &err {
                    self.renderer
                        .on_node_failed(&current, element, &mut surface, source)?;
                    drop(state);
                    drop(surface);
                    tracing::warn!(target: targets::ENGINE, id = %current.id, error = %source, "child fetch failed");
                    self.signals.fetch_failed.emit(FetchFailure {
                        node: Some(current),
                        error: source.clone(),
                    });
                } else {
                    self.renderer
                        .on_node_collapsed(&current, element, &mut surface)?;
                    drop(state);
                    drop(surface);
                    tracing::warn!(target: targets::ENGINE, id = %current.id, %err, "expand failed");
                }
                Err(err)
            }
        }
    }

    /// Removes the displayed descendants of the node at `element`.
    #[tracing::instrument(skip(self), target = "arbor::engine", level = "debug")]
    pub(crate) fn collapse(&self, element: ElementId) -> Result<CollapseOutcome> {
        let (mut surface, mut state) = self.lock();
        let mut node = state
            .store
            .read(element)
            .ok_or(TreeError::NotANode(element))?;
        if node.loading || node.state != CollapsibleState::Expanded {
            tracing::trace!(target: targets::ENGINE, id = %node.id, loading = node.loading, "collapse suppressed");
            return Ok(CollapseOutcome::Suppressed);
        }

        let descendants: Vec<ElementId> = surface
            .following_siblings(element)?
            .iter()
            .copied()
            .take_while(|&next| {
                state
                    .store
                    .get(next)
                    .is_some_and(|sibling| sibling.level > node.level)
            })
            .collect();
        if !descendants.is_empty() {
            surface.remove_following(element, descendants.len())?;
        }
        for next in &descendants {
            state.store.remove(*next);
        }
        let removed = descendants.len();

        node.state = CollapsibleState::Collapsed;
        self.persist(&mut surface, &mut state, element, &node)?;
        self.renderer.on_node_collapsed(&node, element, &mut surface)?;
        drop(state);
        drop(surface);

        tracing::debug!(target: targets::ENGINE, id = %node.id, removed, "collapsed");
        self.signals.collapsed.emit(node);
        Ok(CollapseOutcome::Collapsed { removed })
    }
}
