//! Data model for the tree control.
//!
//! - [`Item`]: what a provider returns for one entry
//! - [`Node`]: the runtime record of a displayed entry (item + depth + loading)
//! - [`DataProvider`]: asynchronous source of children
//! - [`MetadataStore`]: side-table mapping displayed elements to their nodes
//!
//! ```text
//! ┌──────────────┐  Vec<Item>  ┌──────────────┐  Node   ┌───────────────┐
//! │ DataProvider │────────────>│    Engine    │────────>│ MetadataStore │
//! └──────────────┘             └──────────────┘         └───────────────┘
//! ```

mod item;
pub mod metadata;
mod node;
mod provider;

pub use item::{CollapsibleState, Icon, Item};
pub use metadata::MetadataStore;
pub use node::Node;
pub use provider::{DataProvider, FnProvider, StaticProvider};
