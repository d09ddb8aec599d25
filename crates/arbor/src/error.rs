//! Error types for the tree control.

use arbor_core::{ElementId, SurfaceError};

/// Result type alias for tree operations.
pub type Result<T> = std::result::Result<T, TreeError>;

/// Errors reported by a [`DataProvider`](crate::model::DataProvider) fetch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The backing source could not be reached or refused the request.
    #[error("Data source unavailable: {0}")]
    Unavailable(String),

    /// The requested parent is unknown to the source.
    #[error("Unknown parent '{0}'")]
    UnknownParent(String),

    /// Any other failure, described by the provider.
    #[error("{0}")]
    Other(String),
}

impl ProviderError {
    /// Create a free-form provider error.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

/// Errors that can occur in the tree control.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// Fetching children from the data provider failed.
    #[error("Failed to fetch children of {}: {source}", .parent.as_deref().unwrap_or("<root>"))]
    ProviderFetch {
        /// The parent whose children were requested, `None` for roots.
        parent: Option<String>,
        #[source]
        source: ProviderError,
    },

    /// The element does not carry a node record.
    #[error("Element {0:?} has no node record")]
    NotANode(ElementId),

    /// The view is not attached to a host container.
    #[error("Tree view is not attached")]
    NotAttached,

    /// Attaching needs a running Tokio runtime to drive fetches.
    #[error("No Tokio runtime available to drive fetches")]
    NoRuntime,

    /// An element operation failed.
    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),

    /// A node record could not be encoded or decoded.
    #[error("Invalid node record: {0}")]
    Record(#[from] serde_json::Error),
}

/// Errors raised while loading a [`TreeViewConfig`](crate::view::TreeViewConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML input could not be parsed.
    #[error("Invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON input could not be parsed.
    #[error("Invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// A value parsed but is out of range.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// The offending field.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },
}
