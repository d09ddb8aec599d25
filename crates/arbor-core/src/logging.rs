//! Logging and debugging facilities for Arbor.
//!
//! Arbor uses the `tracing` crate for instrumentation. Nothing is printed
//! unless the host installs a subscriber:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("arbor=debug,arbor_core=info")
//!     .init();
//! ```
//!
//! Use [`SurfaceDebug`] to dump an element subtree while debugging skins:
//!
//! ```
//! use arbor_core::{Surface, SurfaceDebug};
//!
//! let mut surface = Surface::new();
//! let root = surface.create_element("div");
//! let item = surface.create_element("span");
//! surface.append_child(root, item).unwrap();
//! surface.set_text(item, "hello").unwrap();
//!
//! let dump = SurfaceDebug::new().format_subtree(&surface, root).unwrap();
//! assert!(dump.contains("hello"));
//! ```

use std::fmt::Write as FmtWrite;

use crate::error::Result;
use crate::surface::{ElementId, Surface};

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Element surface target.
    pub const SURFACE: &str = "arbor_core::surface";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "arbor_core::signal";
    /// Expansion engine target.
    pub const ENGINE: &str = "arbor::engine";
    /// Click dispatch target.
    pub const DISPATCH: &str = "arbor::dispatch";
    /// Tree view lifecycle target.
    pub const TREE_VIEW: &str = "arbor::tree_view";
}

/// Style options for subtree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
}

/// Configuration for [`SurfaceDebug`] output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show raw element IDs.
    pub show_ids: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: false,
            max_depth: None,
        }
    }
}

impl TreeFormatOptions {
    /// Create options for detailed debugging output.
    pub fn detailed() -> Self {
        Self {
            show_ids: true,
            ..Default::default()
        }
    }
}

/// Debug utility for visualizing element subtrees.
#[derive(Debug, Clone, Default)]
pub struct SurfaceDebug {
    options: TreeFormatOptions,
}

impl SurfaceDebug {
    /// Create a visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format the subtree rooted at `root`, one element per line.
    pub fn format_subtree(&self, surface: &Surface, root: ElementId) -> Result<String> {
        let mut output = String::new();
        self.format_into(surface, root, "", true, 0, &mut output)?;
        Ok(output)
    }

    fn format_into(
        &self,
        surface: &Surface,
        id: ElementId,
        prefix: &str,
        is_last: bool,
        depth: usize,
        output: &mut String,
    ) -> Result<()> {
        let (branch, continuation) = match (self.options.style, depth, is_last) {
            (_, 0, _) => ("", ""),
            (TreeStyle::Ascii, _, false) => ("+-- ", "|   "),
            (TreeStyle::Ascii, _, true) => ("`-- ", "    "),
            (TreeStyle::Unicode, _, false) => ("\u{251C}\u{2500}\u{2500} ", "\u{2502}   "),
            (TreeStyle::Unicode, _, true) => ("\u{2514}\u{2500}\u{2500} ", "    "),
        };

        let _ = write!(output, "{prefix}{branch}<{}", surface.tag(id)?);
        let classes = surface.classes(id)?;
        if !classes.is_empty() {
            let _ = write!(output, " class=\"{}\"", classes.join(" "));
        }
        if self.options.show_ids {
            let _ = write!(output, " #{}", id.as_raw());
        }
        output.push('>');
        if let Some(text) = surface.text(id)? {
            let _ = write!(output, " {text:?}");
        }
        output.push('\n');

        if self.options.max_depth.is_some_and(|max| depth >= max) {
            return Ok(());
        }

        let child_prefix = format!("{prefix}{continuation}");
        let children = surface.children(id)?;
        for (i, &child) in children.iter().enumerate() {
            self.format_into(
                surface,
                child,
                &child_prefix,
                i + 1 == children.len(),
                depth + 1,
                output,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_subtree_ascii() {
        let mut surface = Surface::new();
        let root = surface.create_element("div");
        surface.add_class(root, "treeview").unwrap();
        let a = surface.create_element("div");
        let b = surface.create_element("div");
        surface.set_text(a, "A").unwrap();
        surface.set_text(b, "B").unwrap();
        surface.append_child(root, a).unwrap();
        surface.append_child(root, b).unwrap();

        let options = TreeFormatOptions {
            style: TreeStyle::Ascii,
            ..Default::default()
        };
        let dump = SurfaceDebug::with_options(options)
            .format_subtree(&surface, root)
            .unwrap();

        assert_eq!(
            dump,
            "<div class=\"treeview\">\n+-- <div> \"A\"\n`-- <div> \"B\"\n"
        );
    }

    #[test]
    fn test_max_depth_truncates() {
        let mut surface = Surface::new();
        let root = surface.create_element("div");
        let child = surface.create_element("div");
        surface.append_child(root, child).unwrap();

        let options = TreeFormatOptions {
            max_depth: Some(0),
            ..Default::default()
        };
        let dump = SurfaceDebug::with_options(options)
            .format_subtree(&surface, root)
            .unwrap();
        assert_eq!(dump.lines().count(), 1);
    }
}
