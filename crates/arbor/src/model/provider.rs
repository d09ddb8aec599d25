//! Data providers supply children on demand.
//!
//! A [`DataProvider`] is asked for the children of one parent at a time: once
//! at attach time for the roots, and again every time a node is expanded. Nothing
//! is cached between collapse and re-expand.
//!
//! # Example
//!
//! ```
//! use arbor::model::{FnProvider, Item};
//!
//! let provider = FnProvider::new(|parent: Option<String>| async move {
//!     Ok::<_, arbor::ProviderError>(match parent.as_deref() {
//!         None => vec![Item::collapsed("docs", "Documents")],
//!         Some(_) => vec![Item::leaf("readme", "README.md")],
//!     })
//! });
//! # let _ = provider;
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures_util::future::{self, BoxFuture, FutureExt};

use super::item::Item;
use crate::error::ProviderError;

/// Asynchronous source of tree children.
///
/// The returned future must be `'static`: clone whatever it needs out of
/// `self` before building it. Items are displayed in the order returned.
pub trait DataProvider: Send + Sync {
    /// Fetch the children of `parent`, or the roots when `parent` is `None`.
    fn get_children(
        &self,
        parent: Option<&str>,
    ) -> BoxFuture<'static, Result<Vec<Item>, ProviderError>>;
}

/// Provider backed by a closure returning a future.
pub struct FnProvider<F> {
    fetch: F,
}

impl<F> FnProvider<F> {
    /// Wrap a closure. The closure receives an owned copy of the parent id.
    pub fn new(fetch: F) -> Self {
        Self { fetch }
    }
}

impl<F, Fut> DataProvider for FnProvider<F>
where
    F: Fn(Option<String>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<Item>, ProviderError>> + Send + 'static,
{
    fn get_children(
        &self,
        parent: Option<&str>,
    ) -> BoxFuture<'static, Result<Vec<Item>, ProviderError>> {
        (self.fetch)(parent.map(str::to_owned)).boxed()
    }
}

/// In-memory provider with a fixed hierarchy.
///
/// Fetches resolve immediately. Unknown parents fail with
/// [`ProviderError::UnknownParent`].
#[derive(Debug, Default)]
pub struct StaticProvider {
    roots: Vec<Item>,
    children: HashMap<String, Vec<Item>>,
    fetches: AtomicUsize,
}

impl StaticProvider {
    /// Creates a provider with the given roots and no children.
    pub fn new(roots: Vec<Item>) -> Self {
        Self {
            roots,
            ..Default::default()
        }
    }

    /// Registers the children of `parent`.
    pub fn with_children(mut self, parent: impl Into<String>, children: Vec<Item>) -> Self {
        self.children.insert(parent.into(), children);
        self
    }

    /// Number of fetches served so far, successful or not.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl DataProvider for StaticProvider {
    fn get_children(
        &self,
        parent: Option<&str>,
    ) -> BoxFuture<'static, Result<Vec<Item>, ProviderError>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let result = match parent {
            None => Ok(self.roots.clone()),
            Some(id) => self
                .children
                .get(id)
                .cloned()
                .ok_or_else(|| ProviderError::UnknownParent(id.to_string())),
        };
        future::ready(result).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_provider() {
        let provider = StaticProvider::new(vec![Item::collapsed("a", "A")])
            .with_children("a", vec![Item::leaf("a1", "A1")]);

        let roots = provider.get_children(None).await.unwrap();
        assert_eq!(roots, vec![Item::collapsed("a", "A")]);

        let children = provider.get_children(Some("a")).await.unwrap();
        assert_eq!(children[0].id, "a1");

        let missing = provider.get_children(Some("zzz")).await;
        assert_eq!(missing, Err(ProviderError::UnknownParent("zzz".into())));
        assert_eq!(provider.fetch_count(), 3);
    }

    #[tokio::test]
    async fn test_fn_provider_receives_parent() {
        let provider = FnProvider::new(|parent: Option<String>| async move {
            Ok(vec![Item::leaf(
                parent.unwrap_or_else(|| "root".into()),
                "x",
            )])
        });

        assert_eq!(provider.get_children(None).await.unwrap()[0].id, "root");
        assert_eq!(provider.get_children(Some("p")).await.unwrap()[0].id, "p");
    }
}
