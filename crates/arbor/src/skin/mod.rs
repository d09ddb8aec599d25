//! Ready-made node renderers.
//!
//! - [`PlainSkin`]: state classes on a bare element, label as text
//! - [`ListGroupSkin`]: list-group rows with an expando glyph and an icon

pub mod list_group;
pub mod plain;

pub use list_group::ListGroupSkin;
pub use plain::PlainSkin;
