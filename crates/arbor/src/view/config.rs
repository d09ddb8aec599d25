//! Tree view configuration.
//!
//! ```
//! use arbor::view::TreeViewConfig;
//!
//! let config = TreeViewConfig::from_toml_str(r#"
//!     indent_step = 1.5
//!     metadata_attribute = "data-node"
//! "#).unwrap();
//!
//! assert_eq!(config.indent_step, 1.5);
//! assert_eq!(config.mount_class, "treeview");
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Presentation settings the engine applies to every element it manages.
///
/// Missing fields take their [`Default`] values when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeViewConfig {
    /// Tag of the mount element inserted into the host container.
    pub mount_tag: String,
    /// Class added to the mount element.
    pub mount_class: String,
    /// Class added to every node element.
    pub node_class: String,
    /// Indentation per level, in `indent_unit`.
    pub indent_step: f32,
    /// Unit appended to the indentation amount.
    pub indent_unit: String,
    /// Style property receiving the indentation.
    pub indent_property: String,
    /// Attribute mirroring each node's JSON record; `None` disables mirroring.
    pub metadata_attribute: Option<String>,
}

impl Default for TreeViewConfig {
    fn default() -> Self {
        Self {
            mount_tag: "div".to_string(),
            mount_class: "treeview".to_string(),
            node_class: "treeview-node".to_string(),
            indent_step: 1.0,
            indent_unit: "em".to_string(),
            indent_property: "padding-left".to_string(),
            metadata_attribute: Some("data-treeview".to_string()),
        }
    }
}

impl TreeViewConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()
    }

    /// Parses a JSON document.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if !self.indent_step.is_finite() || self.indent_step < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "indent_step",
                message: format!("expected a non-negative number, got {}", self.indent_step),
            });
        }
        if self.mount_tag.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "mount_tag",
                message: "must not be empty".to_string(),
            });
        }
        Ok(self)
    }

    /// Sets the indentation per level.
    pub fn with_indent(mut self, step: f32, unit: impl Into<String>) -> Self {
        self.indent_step = step;
        self.indent_unit = unit.into();
        self
    }

    /// Sets or disables the metadata mirror attribute.
    pub fn with_metadata_attribute(mut self, name: Option<&str>) -> Self {
        self.metadata_attribute = name.map(str::to_owned);
        self
    }

    /// Indentation value for a node at `level`, e.g. `"2em"`.
    pub fn indent_for(&self, level: usize) -> String {
        format!("{}{}", level as f32 * self.indent_step, self.indent_unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TreeViewConfig::default();
        assert_eq!(config.indent_for(0), "0em");
        assert_eq!(config.indent_for(2), "2em");
        assert_eq!(config.metadata_attribute.as_deref(), Some("data-treeview"));
    }

    #[test]
    fn test_builder() {
        let config = TreeViewConfig::new()
            .with_indent(12.0, "px")
            .with_metadata_attribute(None);
        assert_eq!(config.indent_for(3), "36px");
        assert_eq!(config.metadata_attribute, None);
    }

    #[test]
    fn test_json_partial() {
        let config = TreeViewConfig::from_json_str(r#"{"node_class":"row"}"#).unwrap();
        assert_eq!(config.node_class, "row");
        assert_eq!(config.mount_class, "treeview");
    }

    #[test]
    fn test_rejects_negative_indent() {
        let err = TreeViewConfig::from_toml_str("indent_step = -1.0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "indent_step",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        assert!(matches!(
            TreeViewConfig::from_toml_str("indent_step = ="),
            Err(ConfigError::Toml(_))
        ));
    }
}
