//! Signal/slot notifications for Arbor.
//!
//! A [`Signal`] holds any number of connected slots (closures) and invokes
//! each of them, in connection order, whenever the signal is emitted. Views use
//! signals to publish state transitions (a node expanded, a leaf selected, a
//! fetch failed) without knowing who listens.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The signal itself
//! - [`ConnectionId`] - Returned by [`Signal::connect`], used to disconnect
//!
//! # Re-entrancy
//!
//! Slots are collected before any of them runs, so a slot may connect to or
//! disconnect from the signal that is invoking it. Changes take effect on the
//! next emission.
//!
//! # Example
//!
//! ```
//! use arbor_core::Signal;
//!
//! let selection_changed = Signal::<Vec<String>>::new();
//! let conn_id = selection_changed.connect(|ids| {
//!     println!("selected: {}", ids.join(", "));
//! });
//!
//! selection_changed.emit(vec!["a1".to_string()]);
//! assert!(selection_changed.disconnect(conn_id));
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// Identifies one slot connected to a [`Signal`].
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A signal that can have multiple connected slots.
///
/// `Args` is the argument each slot receives by reference.
pub struct Signal<Args> {
    connections: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connections.lock().len())
            .finish()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
        }
    }

    /// Connect a slot, returning the id that disconnects it.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Disconnect a slot. Returns `true` if it was still connected.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Invoke every connected slot with `args`, in connection order.
    #[tracing::instrument(skip_all, target = "arbor_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        let slots: Vec<Slot<Args>> = self.connections.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");
        for slot in slots {
            slot(&args);
        }
    }
}

static_assertions::assert_impl_all!(Signal<String>: Send, Sync);
