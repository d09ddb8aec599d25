//! Lazily populated tree example.
//!
//! Builds a tree over a provider that simulates a slow backend, clicks
//! through it the way a host would, and prints the element tree after each
//! step.
//!
//! Run with: RUST_LOG=arbor=debug cargo run -p arbor --example lazy_tree

use std::sync::Arc;
use std::time::Duration;

use arbor::model::{FnProvider, Item};
use arbor::skin::ListGroupSkin;
use arbor::view::TreeView;
use arbor_core::{Surface, SurfaceDebug};

fn children(parent: Option<&str>) -> Vec<Item> {
    match parent {
        None => vec![
            Item::collapsed("p-docs", "Documents").with_icon("bi-folder"),
            Item::expanded("p-src", "Sources").with_icon("bi-folder"),
            Item::leaf("g-clock", "Last sync").with_icon("bi-clock"),
        ],
        Some("p-docs") => vec![
            Item::leaf("c-readme", "README.md").with_icon("bi-file-earmark"),
            Item::leaf("c-notes", "notes.txt").with_icon("bi-file-earmark"),
        ],
        Some("p-src") => vec![Item::leaf("c-main", "main.rs").with_icon("bi-file-earmark")],
        Some(_) => Vec::new(),
    }
}

#[tokio::main]
async fn main() -> arbor::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let provider = FnProvider::new(|parent: Option<String>| async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok(children(parent.as_deref()))
    });

    let surface = Surface::shared();
    let container = surface.lock().create_element("body");

    let view = TreeView::builder(Arc::new(provider))
        .renderer(Arc::new(ListGroupSkin::new()))
        .build(surface.clone(), container);

    view.signals().selection_changed.connect(|nodes| {
        println!("selected: {}", nodes[0].label);
    });

    view.attach()?;
    view.settle().await;
    dump("after attach", &surface, container)?;

    if let Some(&docs) = view.find("p-docs").first() {
        view.handle_click(docs)?;
        view.settle().await;
        dump("after expanding Documents", &surface, container)?;
    }

    if let Some(&readme) = view.find("c-readme").first() {
        view.handle_click(readme)?;
    }

    view.collapse_all()?;
    dump("after collapse_all", &surface, container)?;

    view.detach()?;
    Ok(())
}

fn dump(title: &str, surface: &arbor_core::SharedSurface, root: arbor_core::ElementId) -> arbor::Result<()> {
    println!("{title}");
    println!("{}", "=".repeat(title.len()));
    println!("{}", SurfaceDebug::new().format_subtree(&surface.lock(), root)?);
    Ok(())
}
