//! Core systems for Arbor.
//!
//! This crate provides the toolkit-independent foundations the Arbor tree
//! control is built on:
//!
//! - **Surface**: a retained element tree standing in for the host's document
//! - **Signal/Slot System**: type-safe notifications between components
//! - **Logging**: `tracing` targets and subtree dumps for debugging
//!
//! # Signal/Slot Example
//!
//! ```
//! use arbor_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```

mod error;
pub mod logging;
pub mod signal;
pub mod surface;

pub use error::{Result, SurfaceError};
pub use logging::{SurfaceDebug, TreeFormatOptions, TreeStyle};
pub use signal::{ConnectionId, Signal};
pub use surface::{Ancestors, ElementId, SharedSurface, Surface};
