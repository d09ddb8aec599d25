//! Lazily populated tree list control.
//!
//! This crate renders a hierarchy as a flat, indented list of node elements on
//! an [`arbor_core::Surface`], fetching each level from a [`DataProvider`] only
//! when its parent is first expanded:
//!
//! - **Model**: provider items, node records, and the element-to-node side-table
//! - **View**: the [`TreeView`] controller, its expansion engine, and click routing
//! - **Skins**: ready-made [`NodeRenderer`] implementations
//!
//! The displayed nodes always form the pre-order depth-first flattening of the
//! expanded part of the tree.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use arbor::model::{Item, StaticProvider};
//! use arbor::skin::ListGroupSkin;
//! use arbor::view::TreeView;
//! use arbor_core::Surface;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> arbor::Result<()> {
//! let surface = Surface::shared();
//! let container = surface.lock().create_element("body");
//!
//! let provider = StaticProvider::new(vec![
//!     Item::collapsed("a", "A"),
//!     Item::leaf("b", "B"),
//! ])
//! .with_children("a", vec![Item::leaf("a1", "A1")]);
//!
//! let view = TreeView::builder(Arc::new(provider))
//!     .renderer(Arc::new(ListGroupSkin::new()))
//!     .build(surface.clone(), container);
//!
//! view.attach()?;
//! view.settle().await;
//!
//! let a = view.find("a")[0];
//! view.expand(a).await?;
//!
//! let labels: Vec<String> = view.display_list().into_iter().map(|(_, n)| n.label).collect();
//! assert_eq!(labels, ["A", "A1", "B"]);
//! # Ok(())
//! # }
//! ```
//!
//! [`DataProvider`]: model::DataProvider
//! [`TreeView`]: view::TreeView
//! [`NodeRenderer`]: view::NodeRenderer

mod error;
pub mod model;
pub mod skin;
pub mod view;

pub use error::{ConfigError, ProviderError, Result, TreeError};
