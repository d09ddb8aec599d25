//! Shared fixtures for tree view integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use arbor::ProviderError;
use arbor::model::{DataProvider, Item, Node};
use arbor::skin::PlainSkin;
use arbor::view::{NodeRenderer, TreeView};
use arbor_core::{ElementId, SharedSurface, Surface, SurfaceError};
use futures_util::future::{BoxFuture, FutureExt};
use parking_lot::Mutex;
use tokio::sync::oneshot;

type Reply = Result<Vec<Item>, ProviderError>;

/// Provider whose answers are fixed, except for parents that have been gated:
/// a fetch of a gated parent waits until the test releases it.
#[derive(Default)]
pub struct GatedProvider {
    answers: Mutex<HashMap<Option<String>, Reply>>,
    gates: Mutex<HashMap<String, oneshot::Receiver<Reply>>>,
    calls: Mutex<Vec<Option<String>>>,
}

impl GatedProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Sets the answer for `parent` (`None` for the roots).
    pub fn answer(&self, parent: Option<&str>, items: Vec<Item>) {
        self.answers
            .lock()
            .insert(parent.map(str::to_owned), Ok(items));
    }

    /// Makes every fetch of `parent` fail until answered again.
    pub fn fail(&self, parent: Option<&str>, error: ProviderError) {
        self.answers
            .lock()
            .insert(parent.map(str::to_owned), Err(error));
    }

    /// Holds the next fetch of `parent` until the returned sender fires.
    pub fn gate(&self, parent: &str) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().insert(parent.to_string(), rx);
        tx
    }

    /// How many times `parent` was fetched.
    pub fn calls(&self, parent: Option<&str>) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.as_deref() == parent)
            .count()
    }
}

impl DataProvider for GatedProvider {
    fn get_children(&self, parent: Option<&str>) -> BoxFuture<'static, Reply> {
        self.calls.lock().push(parent.map(str::to_owned));
        if let Some(gate) = parent.and_then(|id| self.gates.lock().remove(id)) {
            return async move {
                gate.await
                    .unwrap_or_else(|_| Err(ProviderError::other("gate dropped")))
            }
            .boxed();
        }
        let reply = self
            .answers
            .lock()
            .get(&parent.map(str::to_owned))
            .cloned()
            .unwrap_or_else(|| Err(ProviderError::UnknownParent(parent.unwrap_or("").into())));
        futures_util::future::ready(reply).boxed()
    }
}

/// [`PlainSkin`] that logs every hook as `hook:id` and can fail one render.
#[derive(Default)]
pub struct RecordingSkin {
    inner: PlainSkin,
    events: Mutex<Vec<String>>,
    renders: AtomicUsize,
    fail_render: Option<usize>,
}

impl RecordingSkin {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Makes the `n`th call to `render_node` (counting from 1) fail.
    pub fn failing_render(n: usize) -> Arc<Self> {
        Arc::new(Self {
            fail_render: Some(n),
            ..Self::default()
        })
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().clone()
    }

    fn record(&self, hook: &str, node: &Node) {
        self.events.lock().push(format!("{hook}:{}", node.id));
    }
}

impl NodeRenderer for RecordingSkin {
    fn render_node(&self, node: &Node, surface: &mut Surface) -> arbor_core::Result<ElementId> {
        let n = self.renders.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_render == Some(n) {
            self.record("render-failed", node);
            return Err(SurfaceError::Detached(ElementId::default()));
        }
        self.inner.render_node(node, surface)
    }

    fn on_node_loading(
        &self,
        node: &Node,
        element: ElementId,
        surface: &mut Surface,
    ) -> arbor_core::Result<()> {
        self.record("loading", node);
        self.inner.on_node_loading(node, element, surface)
    }

    fn on_node_collapsed(
        &self,
        node: &Node,
        element: ElementId,
        surface: &mut Surface,
    ) -> arbor_core::Result<()> {
        self.record("collapsed", node);
        self.inner.on_node_collapsed(node, element, surface)
    }

    fn on_node_expanded(
        &self,
        node: &Node,
        element: ElementId,
        surface: &mut Surface,
    ) -> arbor_core::Result<()> {
        self.record("expanded", node);
        self.inner.on_node_expanded(node, element, surface)
    }

    fn on_node_failed(
        &self,
        node: &Node,
        element: ElementId,
        surface: &mut Surface,
        error: &ProviderError,
    ) -> arbor_core::Result<()> {
        self.record("failed", node);
        self.inner.on_node_failed(node, element, surface, error)
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A surface with a host container.
pub fn host() -> (SharedSurface, ElementId) {
    let surface = Surface::shared();
    let container = surface.lock().create_element("body");
    (surface, container)
}

/// Compact rendering of a node: `label@level:state`, with `+loading` appended.
pub fn describe(node: &Node) -> String {
    let state = match node.state.as_str() {
        "" => "leaf",
        other => other,
    };
    let loading = if node.loading { "+loading" } else { "" };
    format!("{}@{}:{}{}", node.label, node.level, state, loading)
}

pub fn snapshot(view: &TreeView) -> Vec<String> {
    view.display_list()
        .iter()
        .map(|(_, node)| describe(node))
        .collect()
}

/// The single element displaying `id`.
pub fn element(view: &TreeView, id: &str) -> ElementId {
    let found = view.find(id);
    assert_eq!(found.len(), 1, "expected exactly one node with id {id:?}");
    found[0]
}

/// Polls `condition` until it holds, yielding to spawned tasks in between.
pub async fn eventually(mut condition: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}
