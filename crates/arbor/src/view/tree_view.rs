//! TreeView controller: lifecycle, public operations, and signals.
//!
//! A [`TreeView`] owns one mount element inside a host container. Attaching
//! creates the mount and starts the root fetch; clicks forwarded by the host
//! through [`TreeView::handle_click`] are resolved to nodes and routed to the
//! expansion engine or to the skin.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use arbor::model::{Item, StaticProvider};
//! use arbor::skin::PlainSkin;
//! use arbor::view::TreeView;
//! use arbor_core::Surface;
//!
//! # async fn demo() -> arbor::Result<()> {
//! let surface = Surface::shared();
//! let container = surface.lock().create_element("body");
//!
//! let provider = StaticProvider::new(vec![Item::collapsed("a", "A")])
//!     .with_children("a", vec![Item::leaf("a1", "A1")]);
//!
//! let view = TreeView::builder(Arc::new(provider))
//!     .renderer(Arc::new(PlainSkin::new()))
//!     .build(surface.clone(), container);
//!
//! view.signals().selection_changed.connect(|nodes| {
//!     println!("selected {:?}", nodes[0].label);
//! });
//!
//! view.attach()?;
//! view.settle().await;
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use arbor_core::logging::targets;
use arbor_core::{ElementId, SharedSurface, Signal, Surface};
use parking_lot::{Mutex, MutexGuard};
use tokio::runtime::Handle;
use tokio::sync::Notify;

use super::config::TreeViewConfig;
use super::dispatch::Dispatch;
use super::engine::{CollapseOutcome, ExpandOutcome};
use super::renderer::NodeRenderer;
use crate::error::{ProviderError, Result, TreeError};
use crate::model::{DataProvider, MetadataStore, Node};
use crate::skin::PlainSkin;

/// A failed child fetch, as reported by [`TreeSignals::fetch_failed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    /// The node whose children were requested, `None` for the roots.
    pub node: Option<Node>,
    /// What the provider reported.
    pub error: ProviderError,
}

/// Notifications published by a [`TreeView`].
///
/// Slots run after the view has released its locks, so they may query the view.
#[derive(Debug, Default)]
pub struct TreeSignals {
    /// A node finished expanding.
    pub expanded: Signal<Node>,
    /// A node collapsed.
    pub collapsed: Signal<Node>,
    /// A leaf was clicked; carries the selected nodes.
    pub selection_changed: Signal<Vec<Node>>,
    /// A child fetch failed.
    pub fetch_failed: Signal<FetchFailure>,
}

/// Mutable view state guarded by a single lock.
#[derive(Default)]
pub(crate) struct ViewState {
    pub(crate) store: MetadataStore,
    pub(crate) mount: Option<ElementId>,
    pub(crate) runtime: Option<Handle>,
}

/// Counts spawned fetch tasks so callers can wait for quiescence.
#[derive(Default)]
pub(crate) struct TaskTracker {
    pending: AtomicUsize,
    idle: Notify,
}

struct PendingGuard<'a>(&'a TaskTracker);

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if self.0.pending.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.0.idle.notify_waiters();
        }
    }
}

impl TaskTracker {
    async fn settle(&self) {
        loop {
            let notified = self.idle.notified();
            if self.pending.load(Ordering::SeqCst) == 0 {
                return;
            }
            notified.await;
        }
    }

    fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }
}

/// Shared state behind a [`TreeView`] handle.
pub(crate) struct TreeInner {
    pub(crate) provider: Arc<dyn DataProvider>,
    pub(crate) renderer: Arc<dyn NodeRenderer>,
    pub(crate) surface: SharedSurface,
    pub(crate) container: ElementId,
    pub(crate) config: TreeViewConfig,
    pub(crate) state: Mutex<ViewState>,
    pub(crate) signals: TreeSignals,
    pub(crate) tasks: TaskTracker,
}

impl TreeInner {
    /// Locks the surface, then the view state. Always in this order.
    pub(crate) fn lock(&self) -> (MutexGuard<'_, Surface>, MutexGuard<'_, ViewState>) {
        let surface = self.surface.lock();
        let state = self.state.lock();
        (surface, state)
    }

    /// Spawns a tracked task on the view's runtime.
    pub(crate) fn spawn<F>(self: &Arc<Self>, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let runtime = self
            .state
            .lock()
            .runtime
            .clone()
            .or_else(|| Handle::try_current().ok());
        let Some(runtime) = runtime else {
            tracing::warn!(target: targets::TREE_VIEW, "no runtime available, dropping task");
            return;
        };

        self.tasks.pending.fetch_add(1, Ordering::SeqCst);
        let inner = Arc::clone(self);
        runtime.spawn(async move {
            let _guard = PendingGuard(&inner.tasks);
            task.await;
        });
    }
}

/// Builder for [`TreeView`].
pub struct TreeViewBuilder {
    provider: Arc<dyn DataProvider>,
    renderer: Arc<dyn NodeRenderer>,
    config: TreeViewConfig,
}

impl TreeViewBuilder {
    /// Sets the skin. Defaults to [`PlainSkin`].
    pub fn renderer(mut self, renderer: Arc<dyn NodeRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Sets the configuration.
    pub fn config(mut self, config: TreeViewConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds a detached view that will mount into `container` on `surface`.
    pub fn build(self, surface: SharedSurface, container: ElementId) -> TreeView {
        TreeView {
            inner: Arc::new(TreeInner {
                provider: self.provider,
                renderer: self.renderer,
                surface,
                container,
                config: self.config,
                state: Mutex::new(ViewState::default()),
                signals: TreeSignals::default(),
                tasks: TaskTracker::default(),
            }),
        }
    }
}

/// A lazily-populated tree list control.
///
/// Cloning a `TreeView` yields another handle to the same view.
#[derive(Clone)]
pub struct TreeView {
    inner: Arc<TreeInner>,
}

impl TreeView {
    /// Starts building a view over `provider`.
    pub fn builder(provider: Arc<dyn DataProvider>) -> TreeViewBuilder {
        TreeViewBuilder {
            provider,
            renderer: Arc::new(PlainSkin::new()),
            config: TreeViewConfig::default(),
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Mounts the view into its container and starts fetching the roots.
    ///
    /// Must be called from within a Tokio runtime, which then drives every
    /// fetch the view starts. Attaching an attached view does nothing.
    #[tracing::instrument(skip(self), target = "arbor::tree_view", level = "debug")]
    pub fn attach(&self) -> Result<()> {
        let runtime = Handle::try_current().map_err(|_| TreeError::NoRuntime)?;
        let inner = &self.inner;

        let mount = {
            let (mut surface, mut state) = inner.lock();
            if state.mount.is_some() {
                return Ok(());
            }
            let mount = surface.create_element(&inner.config.mount_tag);
            let placed = surface
                .add_class(mount, &inner.config.mount_class)
                .and_then(|()| surface.append_child(inner.container, mount));
            if let Err(err) = placed {
                let _ = surface.remove(mount);
                return Err(err.into());
            }
            state.mount = Some(mount);
            state.runtime = Some(runtime);
            mount
        };

        tracing::debug!(target: targets::TREE_VIEW, ?mount, "attached");
        let task_inner = Arc::clone(inner);
        inner.spawn(async move {
            if let Err(err) = task_inner.render_roots(mount).await {
                tracing::debug!(target: targets::TREE_VIEW, %err, "root fetch ended with error");
            }
        });
        Ok(())
    }

    /// Removes the mount element and forgets every node record.
    ///
    /// Fetches still in flight complete, but their results are dropped.
    /// Detaching a detached view does nothing. The view may be attached again.
    #[tracing::instrument(skip(self), target = "arbor::tree_view", level = "debug")]
    pub fn detach(&self) -> Result<()> {
        let (mut surface, mut state) = self.inner.lock();
        let Some(mount) = state.mount.take() else {
            return Ok(());
        };
        state.store.clear();
        surface.remove(mount)?;
        tracing::debug!(target: targets::TREE_VIEW, ?mount, "detached");
        Ok(())
    }

    /// Whether the view is mounted.
    pub fn is_attached(&self) -> bool {
        self.inner.state.lock().mount.is_some()
    }

    /// The mount element, while attached.
    pub fn mount(&self) -> Option<ElementId> {
        self.inner.state.lock().mount
    }

    /// Waits until no fetch started by the view is outstanding.
    pub async fn settle(&self) {
        self.inner.tasks.settle().await;
    }

    /// Number of fetch tasks currently outstanding.
    pub fn pending_tasks(&self) -> usize {
        self.inner.tasks.pending()
    }

    // =========================================================================
    // Interaction
    // =========================================================================

    /// Routes a click that originated at `origin`.
    ///
    /// The host calls this for every click inside the mounted region. Clicks
    /// that do not resolve to a node are ignored.
    pub fn handle_click(&self, origin: ElementId) -> Result<Dispatch> {
        self.inner.dispatch_click(origin)
    }

    /// Expands a node and waits for its children to be displayed.
    pub async fn expand(&self, element: ElementId) -> Result<ExpandOutcome> {
        self.inner.expand(element).await
    }

    /// Collapses a node, removing its displayed descendants.
    pub fn collapse(&self, element: ElementId) -> Result<CollapseOutcome> {
        self.inner.collapse(element)
    }

    /// Expands a collapsed node or collapses an expanded one.
    pub async fn toggle(&self, element: ElementId) -> Result<Toggled> {
        let node = self.node(element).ok_or(TreeError::NotANode(element))?;
        if node.is_expanded() {
            self.collapse(element).map(Toggled::Collapse)
        } else {
            self.expand(element).await.map(Toggled::Expand)
        }
    }

    /// Collapses every expanded root. Roots that are loading are left alone.
    pub fn collapse_all(&self) -> Result<usize> {
        let roots: Vec<ElementId> = self
            .display_list()
            .into_iter()
            .filter(|(_, node)| node.level == 0 && node.is_expanded())
            .map(|(element, _)| element)
            .collect();

        let mut collapsed = 0;
        for element in roots {
            if let CollapseOutcome::Collapsed { .. } = self.collapse(element)? {
                collapsed += 1;
            }
        }
        Ok(collapsed)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The displayed nodes, in display order.
    pub fn display_list(&self) -> Vec<(ElementId, Node)> {
        let (surface, state) = self.inner.lock();
        let Some(mount) = state.mount else {
            return Vec::new();
        };
        surface
            .children(mount)
            .unwrap_or_default()
            .iter()
            .filter_map(|&element| state.store.read(element).map(|node| (element, node)))
            .collect()
    }

    /// The record of a displayed node.
    pub fn node(&self, element: ElementId) -> Option<Node> {
        self.inner.state.lock().store.read(element)
    }

    /// Elements displaying a node with the given provider id.
    ///
    /// Ids are only unique among siblings, so several elements may match.
    pub fn find(&self, id: &str) -> Vec<ElementId> {
        let (surface, state) = self.inner.lock();
        let Some(mount) = state.mount else {
            return Vec::new();
        };
        let matches = state.store.find(id);
        surface
            .children(mount)
            .unwrap_or_default()
            .iter()
            .filter(|element| matches.contains(*element))
            .copied()
            .collect()
    }

    /// The notifications this view publishes.
    pub fn signals(&self) -> &TreeSignals {
        &self.inner.signals
    }

    /// The active configuration.
    pub fn config(&self) -> &TreeViewConfig {
        &self.inner.config
    }

    /// The surface the view renders into.
    pub fn surface(&self) -> &SharedSurface {
        &self.inner.surface
    }
}

/// Result of [`TreeView::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    /// The node was collapsed, so an expansion was attempted.
    Expand(ExpandOutcome),
    /// The node was expanded, so it was collapsed.
    Collapse(CollapseOutcome),
}

static_assertions::assert_impl_all!(TreeView: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_settle_waits_for_tracked_tasks() {
        let tracker = Arc::new(TaskTracker::default());
        tracker.settle().await;

        tracker.pending.fetch_add(2, Ordering::SeqCst);
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let worker = Arc::clone(&tracker);
        tokio::spawn(async move {
            let _first = PendingGuard(&worker);
            let _second = PendingGuard(&worker);
            let _ = rx.await;
        });

        assert_eq!(tracker.pending(), 2);
        tx.send(()).unwrap();
        tracker.settle().await;
        assert_eq!(tracker.pending(), 0);
    }
}
