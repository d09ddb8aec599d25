//! The tree list control.
//!
//! - [`TreeView`]: lifecycle, operations, queries, and signals
//! - [`NodeRenderer`]: the capability skins implement
//! - [`TreeViewConfig`]: presentation settings
//!
//! Expansion and click routing live in private submodules; their outcomes are
//! reported through [`ExpandOutcome`], [`CollapseOutcome`], and [`Dispatch`].

mod config;
mod dispatch;
mod engine;
mod renderer;
mod tree_view;

pub use config::TreeViewConfig;
pub use dispatch::Dispatch;
pub use engine::{CollapseOutcome, ExpandOutcome};
pub use renderer::NodeRenderer;
pub use tree_view::{FetchFailure, Toggled, TreeSignals, TreeView, TreeViewBuilder};
